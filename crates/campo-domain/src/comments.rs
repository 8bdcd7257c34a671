//! Historial de comentarios de un caso.
//!
//! El historial es texto append-only: cada acción agrega una entrada con autor
//! y fecha, y nunca se reescribe ni se trunca lo anterior.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates::format_display;

// Separador entre entradas tal como aparece en las planillas existentes.
const ENTRY_SEPARATOR: &str = "\n ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentLog(String);

impl CommentLog {
    /// Envuelve el texto tal como vino de la tabla.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn append(&mut self, entry: &CommentEntry<'_>) {
        if !self.is_empty() {
            self.0.push_str(ENTRY_SEPARATOR);
        }
        self.0.push_str(&entry.to_string());
    }
}

impl fmt::Display for CommentLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entrada atribuida: `[autor em DD/MM/YYYY (TAG)]: texto`.
#[derive(Debug, Clone, Copy)]
pub struct CommentEntry<'a> {
    pub author: &'a str,
    pub date: NaiveDate,
    pub tag: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> CommentEntry<'a> {
    pub fn new(author: &'a str, date: NaiveDate, text: &'a str) -> Self {
        Self { author, date, tag: None, text }
    }

    pub fn tagged(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }
}

impl fmt::Display for CommentEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} em {}", self.author, format_display(self.date))?;
        if let Some(tag) = self.tag {
            write!(f, " ({tag})")?;
        }
        write!(f, "]: {}", self.text.trim())
    }
}
