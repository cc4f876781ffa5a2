//! # Regions
//!
//! The 27 Brazilian federative units a product can originate from.
//!
//! The list is in the order the state picker shows it (alphabetical by
//! name). Codes are the two-letter uppercase abbreviations stored on
//! [`Product::state`](crate::Product).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// A Brazilian state or the Federal District.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BrazilianState {
    AC,
    AL,
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl BrazilianState {
    /// All units, in picker order.
    pub const ALL: [BrazilianState; 27] = [
        BrazilianState::AC,
        BrazilianState::AL,
        BrazilianState::AP,
        BrazilianState::AM,
        BrazilianState::BA,
        BrazilianState::CE,
        BrazilianState::DF,
        BrazilianState::ES,
        BrazilianState::GO,
        BrazilianState::MA,
        BrazilianState::MT,
        BrazilianState::MS,
        BrazilianState::MG,
        BrazilianState::PA,
        BrazilianState::PB,
        BrazilianState::PR,
        BrazilianState::PE,
        BrazilianState::PI,
        BrazilianState::RJ,
        BrazilianState::RN,
        BrazilianState::RS,
        BrazilianState::RO,
        BrazilianState::RR,
        BrazilianState::SC,
        BrazilianState::SP,
        BrazilianState::SE,
        BrazilianState::TO,
    ];

    /// Two-letter code, e.g. "SP".
    pub fn code(&self) -> &'static str {
        match self {
            BrazilianState::AC => "AC",
            BrazilianState::AL => "AL",
            BrazilianState::AP => "AP",
            BrazilianState::AM => "AM",
            BrazilianState::BA => "BA",
            BrazilianState::CE => "CE",
            BrazilianState::DF => "DF",
            BrazilianState::ES => "ES",
            BrazilianState::GO => "GO",
            BrazilianState::MA => "MA",
            BrazilianState::MT => "MT",
            BrazilianState::MS => "MS",
            BrazilianState::MG => "MG",
            BrazilianState::PA => "PA",
            BrazilianState::PB => "PB",
            BrazilianState::PR => "PR",
            BrazilianState::PE => "PE",
            BrazilianState::PI => "PI",
            BrazilianState::RJ => "RJ",
            BrazilianState::RN => "RN",
            BrazilianState::RS => "RS",
            BrazilianState::RO => "RO",
            BrazilianState::RR => "RR",
            BrazilianState::SC => "SC",
            BrazilianState::SP => "SP",
            BrazilianState::SE => "SE",
            BrazilianState::TO => "TO",
        }
    }

    /// Full name as shown in the picker.
    pub fn name(&self) -> &'static str {
        match self {
            BrazilianState::AC => "Acre",
            BrazilianState::AL => "Alagoas",
            BrazilianState::AP => "Amapá",
            BrazilianState::AM => "Amazonas",
            BrazilianState::BA => "Bahia",
            BrazilianState::CE => "Ceará",
            BrazilianState::DF => "Distrito Federal",
            BrazilianState::ES => "Espírito Santo",
            BrazilianState::GO => "Goiás",
            BrazilianState::MA => "Maranhão",
            BrazilianState::MT => "Mato Grosso",
            BrazilianState::MS => "Mato Grosso do Sul",
            BrazilianState::MG => "Minas Gerais",
            BrazilianState::PA => "Pará",
            BrazilianState::PB => "Paraíba",
            BrazilianState::PR => "Paraná",
            BrazilianState::PE => "Pernambuco",
            BrazilianState::PI => "Piauí",
            BrazilianState::RJ => "Rio de Janeiro",
            BrazilianState::RN => "Rio Grande do Norte",
            BrazilianState::RS => "Rio Grande do Sul",
            BrazilianState::RO => "Rondônia",
            BrazilianState::RR => "Roraima",
            BrazilianState::SC => "Santa Catarina",
            BrazilianState::SP => "São Paulo",
            BrazilianState::SE => "Sergipe",
            BrazilianState::TO => "Tocantins",
        }
    }

    /// Looks up a unit by its exact (uppercase) code.
    pub fn from_code(code: &str) -> Option<Self> {
        BrazilianState::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for BrazilianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BrazilianState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BrazilianState::from_code(s).ok_or(())
    }
}
