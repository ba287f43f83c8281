//! Single-table key schema for the persistence collaborator.
//!
//! Access patterns:
//! 1. Receipt items:    PK=RECEIPT#{receipt_id}, SK=ITEM#{item_id}
//! 2. Receipt members:  PK=RECEIPT#{receipt_id}, SK=USER#{user_id}
//! 3. User receipts:    PK=USER#{user_id},       SK=RECEIPT#{receipt_id}
//! 4. Share tokens:     PK=SHARE#{token},        SK=RECEIPT#{receipt_id}
//! 5. Field geometry:   PK=RECEIPT#{receipt_id}, SK=GEOMETRY#{FIELD}#{SIDE}
//!
//! This module owns every key template; callers never format a key string
//! themselves. It does no I/O — the records built from these keys are handed
//! to whatever store the surrounding service uses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::receipt::FieldName;

/// A composite partition/sort key pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub pk: String,
    pub sk: String,
}

/// Entity-type tag stored alongside each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    ReceiptItem,
    ReceiptMember,
    UserReceipt,
    ReceiptShare,
    ReceiptGeometry,
}

impl Entity {
    pub fn tag(&self) -> &'static str {
        match self {
            Entity::ReceiptItem => "RECEIPT_ITEM",
            Entity::ReceiptMember => "RECEIPT_MEMBER",
            Entity::UserReceipt => "USER_RECEIPT",
            Entity::ReceiptShare => "RECEIPT_SHARE",
            Entity::ReceiptGeometry => "RECEIPT_GEOMETRY",
        }
    }
}

/// Which line of a label/value pair a geometry record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometrySide {
    Label,
    Value,
}

impl fmt::Display for GeometrySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometrySide::Label => write!(f, "LABEL"),
            GeometrySide::Value => write!(f, "VALUE"),
        }
    }
}

pub fn receipt_item(receipt_id: &str, item_id: &str) -> Key {
    Key {
        pk: format!("RECEIPT#{receipt_id}"),
        sk: format!("ITEM#{item_id}"),
    }
}

pub fn receipt_member(receipt_id: &str, user_id: &str) -> Key {
    Key {
        pk: format!("RECEIPT#{receipt_id}"),
        sk: format!("USER#{user_id}"),
    }
}

/// Inverted member key used by the user-receipts index.
pub fn user_receipt(user_id: &str, receipt_id: &str) -> Key {
    Key {
        pk: format!("USER#{user_id}"),
        sk: format!("RECEIPT#{receipt_id}"),
    }
}

pub fn receipt_share(token: &str, receipt_id: &str) -> Key {
    Key {
        pk: format!("SHARE#{token}"),
        sk: format!("RECEIPT#{receipt_id}"),
    }
}

/// One geometry record per side of a detected special field.
pub fn field_geometry(receipt_id: &str, field: FieldName, side: GeometrySide) -> Key {
    let field = field.to_string().to_uppercase();
    Key {
        pk: format!("RECEIPT#{receipt_id}"),
        sk: format!("GEOMETRY#{field}#{side}"),
    }
}
