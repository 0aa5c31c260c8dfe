//! Controlled values for animal records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Animal sex. Import files may use the letter or the Portuguese word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Values accepted in import payloads.
    pub const ACCEPTED: [&'static str; 4] = ["M", "F", "Macho", "Fêmea"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "M" | "Macho" => Some(Self::Male),
            "F" | "Fêmea" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Macho",
            Self::Female => "Fêmea",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How the animal entered the herd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Born on the property.
    #[serde(rename = "proprio")]
    OwnBred,
    #[serde(rename = "compra")]
    Purchased,
    #[serde(rename = "leilao")]
    Auction,
    #[serde(rename = "doacao")]
    Donated,
    #[serde(rename = "parceria")]
    Partnership,
}

impl Origin {
    pub const ALL: [Origin; 5] = [
        Origin::OwnBred,
        Origin::Purchased,
        Origin::Auction,
        Origin::Donated,
        Origin::Partnership,
    ];

    /// Accepts the code or the display label.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|origin| origin.code() == value || origin.label() == value)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::OwnBred => "proprio",
            Self::Purchased => "compra",
            Self::Auction => "leilao",
            Self::Donated => "doacao",
            Self::Partnership => "parceria",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OwnBred => "Próprio",
            Self::Purchased => "Compra",
            Self::Auction => "Leilão",
            Self::Donated => "Doação",
            Self::Partnership => "Parceria",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
