// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout-neutral representation of a printable document.
//
// Templates produce a `RenderedDocument`; the screen preview reads it as text
// and `PdfWriter` lays it out on paper.

use chrono::NaiveDate;
use frontdesk_core::DocumentKind;

/// One layout element of a document, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Section heading.
    Heading(String),
    /// `label: value` pair.
    Field { label: String, value: String },
    /// Billable line with a right-aligned amount.
    LineItem { description: String, amount: String },
    /// Summary amount; `grand` totals are printed emphasised.
    Total {
        label: String,
        amount: String,
        grand: bool,
    },
    /// Signature line with the signer's role underneath.
    Signature(String),
    /// Free-form small print.
    Note(String),
    /// Vertical gap.
    Spacer,
}

/// A fully rendered document ready for preview or printing.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    /// Thai title printed at the top.
    pub title: String,
    /// English subtitle under the title.
    pub subtitle: String,
    /// Document number, prefixed per kind.
    pub number: String,
    pub issued_on: NaiveDate,
    /// Seller/hotel header lines.
    pub header: Vec<String>,
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    /// Plain-text rendition for the on-screen preview.
    pub fn to_plain_text(&self) -> String {
        let mut out = Vec::new();
        for line in &self.header {
            out.push(line.clone());
        }
        out.push(String::new());
        out.push(self.title.clone());
        out.push(self.subtitle.clone());
        out.push(format!("เลขที่ / No. {}", self.number));
        out.push(String::new());

        for block in &self.blocks {
            match block {
                Block::Heading(text) => {
                    out.push(String::new());
                    out.push(format!("== {text} =="));
                }
                Block::Field { label, value } => out.push(format!("{label}: {value}")),
                Block::LineItem {
                    description,
                    amount,
                } => out.push(format!("{description} .... {amount}")),
                Block::Total {
                    label,
                    amount,
                    grand,
                } => {
                    if *grand {
                        out.push(format!("** {label}: {amount} **"));
                    } else {
                        out.push(format!("{label}: {amount}"));
                    }
                }
                Block::Signature(role) => {
                    out.push(String::new());
                    out.push("ลงชื่อ ..............................".into());
                    out.push(format!("({role})"));
                }
                Block::Note(text) => out.push(text.clone()),
                Block::Spacer => out.push(String::new()),
            }
        }
        out.join("\n")
    }

    /// Value of the first field with `label`, if any.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Field { label: l, value } if l == label => Some(value.as_str()),
            _ => None,
        })
    }
}
