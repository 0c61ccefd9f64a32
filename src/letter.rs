//! Letters of the alphabet and the families they belong to.
//!
//! The letter drives the special cases in dash location resolution and beta
//! prop separation, so it is modelled as a closed enum rather than a string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// Letter families that share placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterType {
    /// Two shift motions
    Type1,
    /// One shift, one static
    Type2,
    /// One shift, one dash
    Type3,
    /// One dash, one static
    Type4,
    /// Two dashes
    Type5,
    /// Two statics
    Type6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Sigma,
    Delta,
    Theta,
    Omega,
    WDash,
    XDash,
    YDash,
    ZDash,
    SigmaDash,
    DeltaDash,
    ThetaDash,
    OmegaDash,
    Phi,
    Psi,
    Lambda,
    PhiDash,
    PsiDash,
    LambdaDash,
    Alpha,
    Beta,
    Gamma,
}

/// Symbol table: (letter, canonical symbol). Dash letters use a trailing `-`.
const SYMBOLS: [(Letter, &str); 47] = [
    (Letter::A, "A"),
    (Letter::B, "B"),
    (Letter::C, "C"),
    (Letter::D, "D"),
    (Letter::E, "E"),
    (Letter::F, "F"),
    (Letter::G, "G"),
    (Letter::H, "H"),
    (Letter::I, "I"),
    (Letter::J, "J"),
    (Letter::K, "K"),
    (Letter::L, "L"),
    (Letter::M, "M"),
    (Letter::N, "N"),
    (Letter::O, "O"),
    (Letter::P, "P"),
    (Letter::Q, "Q"),
    (Letter::R, "R"),
    (Letter::S, "S"),
    (Letter::T, "T"),
    (Letter::U, "U"),
    (Letter::V, "V"),
    (Letter::W, "W"),
    (Letter::X, "X"),
    (Letter::Y, "Y"),
    (Letter::Z, "Z"),
    (Letter::Sigma, "Σ"),
    (Letter::Delta, "Δ"),
    (Letter::Theta, "θ"),
    (Letter::Omega, "Ω"),
    (Letter::WDash, "W-"),
    (Letter::XDash, "X-"),
    (Letter::YDash, "Y-"),
    (Letter::ZDash, "Z-"),
    (Letter::SigmaDash, "Σ-"),
    (Letter::DeltaDash, "Δ-"),
    (Letter::ThetaDash, "θ-"),
    (Letter::OmegaDash, "Ω-"),
    (Letter::Phi, "Φ"),
    (Letter::Psi, "Ψ"),
    (Letter::Lambda, "Λ"),
    (Letter::PhiDash, "Φ-"),
    (Letter::PsiDash, "Ψ-"),
    (Letter::LambdaDash, "Λ-"),
    (Letter::Alpha, "α"),
    (Letter::Beta, "β"),
    (Letter::Gamma, "Γ"),
];

/// Spelled-out names accepted in addition to the Greek symbols.
const GREEK_NAMES: [(&str, &str); 10] = [
    ("sigma", "Σ"),
    ("delta", "Δ"),
    ("theta", "θ"),
    ("omega", "Ω"),
    ("phi", "Φ"),
    ("psi", "Ψ"),
    ("lambda", "Λ"),
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "Γ"),
];

impl Letter {
    pub fn symbol(self) -> &'static str {
        SYMBOLS
            .iter()
            .find(|(letter, _)| *letter == self)
            .map(|(_, sym)| *sym)
            .unwrap_or("?")
    }

    pub fn letter_type(self) -> LetterType {
        use Letter::*;
        match self {
            A | B | C | D | E | F | G | H | I | J | K | L | M | N | O | P | Q | R | S | T
            | U | V => LetterType::Type1,
            W | X | Y | Z | Sigma | Delta | Theta | Omega => LetterType::Type2,
            WDash | XDash | YDash | ZDash | SigmaDash | DeltaDash | ThetaDash | OmegaDash => {
                LetterType::Type3
            }
            Phi | Psi | Lambda => LetterType::Type4,
            PhiDash | PsiDash | LambdaDash => LetterType::Type5,
            Alpha | Beta | Gamma => LetterType::Type6,
        }
    }

    pub fn all() -> impl Iterator<Item = Letter> {
        SYMBOLS.iter().map(|(letter, _)| *letter)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Letter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Y′ and Y' are accepted spellings of Y-
        let (base, dashed) = match trimmed
            .strip_suffix('-')
            .or_else(|| trimmed.strip_suffix('′'))
            .or_else(|| trimmed.strip_suffix('\''))
        {
            Some(base) => (base, true),
            None => (trimmed, false),
        };

        let lowered = base.to_lowercase();
        let base = GREEK_NAMES
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, sym)| *sym)
            .unwrap_or(base);

        let symbol = if dashed {
            format!("{base}-")
        } else {
            base.to_string()
        };

        SYMBOLS
            .iter()
            .find(|(_, sym)| *sym == symbol)
            .map(|(letter, _)| *letter)
            .ok_or_else(|| ParseError::UnknownLetter {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for Letter {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Letter> for String {
    fn from(letter: Letter) -> String {
        letter.symbol().to_string()
    }
}
