use async_trait::async_trait;
use cardsift_core::{Card, CardView, FilterError};

/// Prints the visible cards to stdout after every applied query.
pub struct TerminalView {
    cards: Vec<Card>,
}

impl TerminalView {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    fn render(&self, positions: impl Iterator<Item = usize>) -> Result<(), FilterError> {
        let mut shown = 0;
        for position in positions {
            let card = self.cards.get(position).ok_or_else(|| {
                FilterError::View(format!("no card rendered at position {position}"))
            })?;
            println!("[{position}] {}", card.label());
            println!("    {}", card.byline());
            shown += 1;
        }
        println!("-- {shown} of {} cards shown", self.cards.len());
        Ok(())
    }
}

#[async_trait]
impl CardView for TerminalView {
    async fn apply(&self, visible: &[usize]) -> Result<(), FilterError> {
        self.render(visible.iter().copied())
    }

    async fn reset(&self) -> Result<(), FilterError> {
        self.render(0..self.cards.len())
    }
}
