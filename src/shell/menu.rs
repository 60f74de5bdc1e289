//! Menu choices. The numbers are the stable contract operators type.

use crate::errors::{Error, Result};
use std::{fmt, str::FromStr};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1
    AddSupply,
    /// 2
    DisplayInventory,
    /// 3
    UpdateSupply,
    /// 4
    DeleteSupply,
    /// 5
    CalculateTotalValue,
    /// 6
    ResetAll,
    /// 7
    Exit,
}

impl MenuChoice {
    /// All choices in menu order
    pub const ALL: [Self; 7] = [
        Self::AddSupply,
        Self::DisplayInventory,
        Self::UpdateSupply,
        Self::DeleteSupply,
        Self::CalculateTotalValue,
        Self::ResetAll,
        Self::Exit,
    ];

    /// Number the operator types for this choice.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::AddSupply => 1,
            Self::DisplayInventory => 2,
            Self::UpdateSupply => 3,
            Self::DeleteSupply => 4,
            Self::CalculateTotalValue => 5,
            Self::ResetAll => 6,
            Self::Exit => 7,
        }
    }

    /// Choice for a typed number, `None` outside 1–7.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }

    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddSupply => "Add Supply",
            Self::DisplayInventory => "Display Inventory",
            Self::UpdateSupply => "Update Supply",
            Self::DeleteSupply => "Delete Supply",
            Self::CalculateTotalValue => "Calculate Total Value",
            Self::ResetAll => "Reset All Data",
            Self::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl FromStr for MenuChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidInput {
            field: "menu choice".to_string(),
            message,
        };
        let number: u32 = s.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        Self::from_number(number).ok_or_else(|| invalid(format!("{number} is not between 1 and 7")))
    }
}
