use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::{Sample, SampleContext, SampleError};
use crate::console;
use crate::llm::ChatHistory;
use crate::structured::parse_json;

const SYSTEM: &str = "You are a data service. Reply only with a JSON object, no prose.";

const CITIES_PROMPT: &str = "List three European capital cities as a JSON object with a `cities` array. \
Each item has `name` (string), `country` (string) and `population` (integer).";

const PICK_PROMPT: &str = "From those cities, pick the best one to visit in winter. \
Reply with a JSON object with `city` (string) and `reason` (string).";

#[derive(Debug, Deserialize, PartialEq)]
pub struct City {
    pub name: String,
    pub country: String,
    pub population: u64,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct CityList {
    pub cities: Vec<City>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct WinterPick {
    pub city: String,
    pub reason: String,
}

/// Structured output: ask for JSON and deserialize it
pub struct JsonMode;

#[async_trait]
impl Sample for JsonMode {
    fn name(&self) -> &'static str {
        "json-mode"
    }

    fn description(&self) -> &'static str {
        "Request JSON replies and parse them into typed values"
    }

    async fn run(&self, ctx: &SampleContext) -> Result<(), SampleError> {
        let mut history = ChatHistory::with_system(SYSTEM);

        history.add_user(CITIES_PROMPT);
        console::user(CITIES_PROMPT);
        let reply = ctx
            .llm
            .complete(ctx.request(history.messages().to_vec()).json())
            .await?
            .text()?
            .to_string();
        match parse_json::<CityList>(&reply) {
            Ok(list) => {
                info!(count = %list.cities.len(), "JsonMode: parsed cities");
                for city in &list.cities {
                    println!("  {:<12} {:<16} {:>12}", city.name, city.country, city.population);
                }
                println!();
            }
            Err(e) => report_parse_failure(&e.to_string(), &reply),
        }
        history.add_assistant(reply);

        history.add_user(PICK_PROMPT);
        console::user(PICK_PROMPT);
        let reply = ctx
            .llm
            .complete(ctx.request(history.messages().to_vec()).json())
            .await?
            .text()?
            .to_string();
        match parse_json::<WinterPick>(&reply) {
            Ok(pick) => console::assistant(&format!("{}: {}", pick.city, pick.reason)),
            Err(e) => report_parse_failure(&e.to_string(), &reply),
        }
        Ok(())
    }
}

fn report_parse_failure(error: &str, raw: &str) {
    warn!(%error, "JsonMode: reply did not parse");
    console::warning(&format!("Failed to parse model reply: {}", error));
    console::note(&format!("Raw reply: {}", raw));
    println!();
}
