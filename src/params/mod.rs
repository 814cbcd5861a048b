//! Parameter values that may be a scalar, a list, or a textual encoding of either.
//!
//! Callers send quality tiers, kernel lists and time parameters in whichever
//! shape is convenient: a JSON array, a bare value, a repeated query key or a
//! stringified literal. [`Param`] captures what arrived and [`Param::decode`]
//! turns it into an explicit [`OneOrMany`].

pub mod literal;

use serde::Deserialize;

use crate::error::{Result, SpiceqlError};

pub use literal::Literal;

/// A parameter as received at the API boundary
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Param<T> {
    /// A real sequence (JSON array or repeated query key)
    Many(Vec<T>),
    /// A textual encoding, decoded as a literal
    Text(String),
    /// A bare scalar
    One(T),
}

/// A decoded parameter shape
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Element types a literal can decode into.
pub trait LiteralElement: Sized {
    /// Human readable element kind, used in error messages
    const KIND: &'static str;

    /// Convert a scalar literal
    fn from_literal(literal: Literal) -> Option<Self>;

    /// Convert one raw value of a repeated query key
    fn from_query_value(raw: &str) -> Option<Self>;

    /// Fallback for text that is not a literal at all
    fn from_bare_text(_raw: &str) -> Option<Self> {
        None
    }
}

impl LiteralElement for f64 {
    const KIND: &'static str = "float";

    fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::Number(value) => Some(value),
            _ => None,
        }
    }

    fn from_query_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl LiteralElement for String {
    const KIND: &'static str = "string";

    fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::Str(value) => Some(value),
            _ => None,
        }
    }

    fn from_query_value(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    // `ckQualities=smithed` names a single tier without quoting it
    fn from_bare_text(raw: &str) -> Option<Self> {
        let word = raw.trim();
        if word.is_empty() || word.contains(|c: char| "[](),'\"".contains(c)) {
            None
        } else {
            Some(word.to_string())
        }
    }
}

impl<T: LiteralElement> Param<T> {
    /// Decode into an explicit scalar or sequence. `name` is only used in
    /// error messages.
    pub fn decode(self, name: &str) -> Result<OneOrMany<T>> {
        match self {
            Param::One(value) => Ok(OneOrMany::One(value)),
            Param::Many(values) => Ok(OneOrMany::Many(values)),
            Param::Text(text) => match Literal::parse(&text) {
                Ok(literal) => OneOrMany::from_literal(literal).ok_or_else(|| {
                    SpiceqlError::malformed(format!(
                        "Param {} must be a {kind} or a list of {kind}s, got {:?}",
                        name,
                        text,
                        kind = T::KIND
                    ))
                }),
                Err(err) => match T::from_bare_text(&text) {
                    Some(value) => Ok(OneOrMany::One(value)),
                    None => Err(SpiceqlError::malformed(format!("Param {}: {}", name, err))),
                },
            },
        }
    }

    /// Build from the raw values of a query key: one value is text, several
    /// values are a sequence.
    pub fn from_query_values(name: &str, raw: &[&str]) -> Result<Option<Self>> {
        match raw {
            [] => Ok(None),
            [single] => Ok(Some(Param::Text(single.to_string()))),
            many => many
                .iter()
                .map(|value| {
                    T::from_query_value(value).ok_or_else(|| {
                        SpiceqlError::malformed(format!(
                            "Param {} must be a list of {}s, got {:?}",
                            name,
                            T::KIND,
                            value
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(|values| Some(Param::Many(values))),
        }
    }
}

impl<T: LiteralElement> OneOrMany<T> {
    /// Convert a literal; nested lists are rejected.
    pub fn from_literal(literal: Literal) -> Option<Self> {
        match literal {
            Literal::List(items) => items
                .into_iter()
                .map(T::from_literal)
                .collect::<Option<Vec<_>>>()
                .map(OneOrMany::Many),
            scalar => T::from_literal(scalar).map(OneOrMany::One),
        }
    }
}

impl<T> OneOrMany<T> {
    /// Flatten to a sequence, wrapping a scalar
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Normalize an optional list-or-scalar parameter into a sequence.
///
/// An absent value yields `default` unchanged. Order is preserved and nothing
/// is de-duplicated.
pub fn normalize_list_or_scalar<T: LiteralElement>(
    value: Option<Param<T>>,
    name: &str,
    default: Vec<T>,
) -> Result<Vec<T>> {
    match value {
        None => Ok(default),
        Some(param) => Ok(param.decode(name)?.into_vec()),
    }
}
