use crate::document::DocumentNode;
use crate::FilterError;
use async_trait::async_trait;

/// Parsed document exposing its elements in document order.
pub trait DocumentTree {
    fn nodes(&self) -> Vec<DocumentNode>;
}

impl DocumentTree for [DocumentNode] {
    fn nodes(&self) -> Vec<DocumentNode> {
        self.to_vec()
    }
}

impl DocumentTree for Vec<DocumentNode> {
    fn nodes(&self) -> Vec<DocumentNode> {
        self.clone()
    }
}

/// Presentation layer that owns the rendered cards.
///
/// Cards are addressed by their position in the collection the session was
/// built from; the view keeps its own handle for each position.
#[async_trait]
pub trait CardView {
    /// Show exactly `visible`, in that order, and hide every other card.
    async fn apply(&self, visible: &[usize]) -> Result<(), FilterError>;

    /// Show every card in document order.
    async fn reset(&self) -> Result<(), FilterError>;
}
