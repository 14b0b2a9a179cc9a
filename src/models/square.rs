use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog identity of a square
pub type SquareId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SquareType {
    /// Something a speaker says on stage
    Quote,
    /// Something that happens in the room
    Event,
    /// A technology getting a mention
    Tech,
    /// A particular person showing up
    Person,
}

/// A catalog item that can be dealt onto a board.
/// Squares never change once they are in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Square {
    pub id: SquareId,
    pub text: String,
    #[serde(rename = "type")]
    pub square_type: SquareType,
    pub description: String,
}

impl Square {
    #[cfg(test)]
    pub fn new(
        id: SquareId,
        text: impl Into<String>,
        square_type: SquareType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            square_type,
            description: description.into(),
        }
    }
}
