//! `obter_custo`: a fixed price list standing in for a store API.

use async_trait::async_trait;

use super::tool::{Tool, ToolError, ToolOutput};
use super::ToolKind;

const PRICES: &[(&str, &str)] = &[
    ("mouse", "Um mouse custa R$ 99,90"),
    ("teclado", "Um teclado custa R$ 149,90"),
    ("monitor", "Um monitor custa R$ 799,00"),
];

const FALLBACK_PRICE: &str = "Demais itens custam R$ 199,00.";

/// Exact-match lookup; anything unlisted gets the catch-all price.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceTable;

impl PriceTable {
    pub fn quote(item: &str) -> &'static str {
        PRICES
            .iter()
            .find(|(name, _)| *name == item)
            .map(|(_, quote)| *quote)
            .unwrap_or(FALLBACK_PRICE)
    }
}

#[async_trait]
impl Tool for PriceTable {
    fn name(&self) -> &str {
        ToolKind::LookupCost.action_name()
    }

    async fn execute(&self, argument: &str) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::Text(Self::quote(argument).to_string()))
    }
}
