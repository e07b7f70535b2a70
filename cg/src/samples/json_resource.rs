use async_trait::async_trait;
use prompttemplate::{PromptArguments, PromptTemplate};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::send_prompt;

pub const PRODUCTS: &str = "products.json";

const TEMPLATE: &str = "Here is our product catalog as JSON:\n{{$catalog}}\n\n\
Which in-stock product would you recommend for {{$need}}, and why? Answer in two sentences.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub in_stock: bool,
}

/// Ground a question in a JSON resource
pub struct JsonResource;

#[async_trait]
impl Sample for JsonResource {
    fn name(&self) -> &'static str {
        "json-resource"
    }

    fn description(&self) -> &'static str {
        "Load products.json and ask a question about it"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        let products: Vec<Product> = ctx.resources.read_json(PRODUCTS)?;
        let available = products.iter().filter(|p| p.in_stock).count();
        info!(total = %products.len(), %available, "JsonResource: loaded catalog");
        console::note(&format!("Loaded {} products ({} in stock)", products.len(), available));

        let args = PromptArguments::new()
            .with("catalog", serde_json::to_string_pretty(&products)?)
            .with("need", "a weekend camping trip");
        let prompt = PromptTemplate::new(TEMPLATE).render(&args);
        console::user("Which in-stock product would you recommend for a weekend camping trip?");

        let reply = send_prompt(ctx.llm.as_ref(), &prompt, ctx.max_tokens).await?;
        console::assistant(&reply);
        Ok(())
    }
}
