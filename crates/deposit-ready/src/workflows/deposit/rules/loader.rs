use super::StateRules;
use crate::workflows::deposit::calendar::DayUnit;
use serde::Deserialize;
use std::io::Read;

pub(crate) fn parse_rules<R: Read>(reader: R) -> Result<Vec<StateRules>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut states = Vec::new();

    for record in csv_reader.deserialize::<StateRulesRow>() {
        let row = record?;
        states.push(row.into_rules());
    }

    Ok(states)
}

#[derive(Debug, Deserialize)]
struct StateRulesRow {
    code: String,
    slug: String,
    name: String,
    statute_title: String,
    return_deadline: u32,
    claim_deadline: u32,
    #[serde(default = "default_day_unit")]
    day_unit: DayUnit,
    damages_multiplier: f64,
    #[serde(default = "default_forfeiture")]
    forfeits_on_late_notice: bool,
    #[serde(default)]
    damages_description: String,
    #[serde(default)]
    additional_damages: String,
    max_small_claims: u32,
    #[serde(default)]
    small_claims_note: String,
}

impl StateRulesRow {
    fn into_rules(self) -> StateRules {
        StateRules {
            code: self.code.to_ascii_uppercase(),
            slug: self.slug.to_ascii_lowercase(),
            name: self.name,
            statute_title: self.statute_title,
            return_deadline: self.return_deadline,
            claim_deadline: self.claim_deadline,
            day_unit: self.day_unit,
            damages_multiplier: self.damages_multiplier,
            forfeits_on_late_notice: self.forfeits_on_late_notice,
            damages_description: self.damages_description,
            additional_damages: self.additional_damages,
            max_small_claims: self.max_small_claims,
            small_claims_note: self.small_claims_note,
        }
    }
}

fn default_day_unit() -> DayUnit {
    DayUnit::Calendar
}

fn default_forfeiture() -> bool {
    true
}
