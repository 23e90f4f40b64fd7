//! Pass: migrate legacy card `data` into `content`
//!
//! For every object in `cards`: when `content` is absent (or null) the value
//! of `data` moves into `content`; `data` is then dropped either way.

use serde_json::Value;

use super::NormalizationPass;

pub struct CardDataToContent;

impl NormalizationPass for CardDataToContent {
    fn name(&self) -> &'static str {
        "card_data_to_content"
    }

    fn since_version(&self) -> u32 {
        1
    }

    fn description(&self) -> &'static str {
        "Move card data into content when content is missing, then drop data"
    }

    fn apply(&self, site: &mut Value) -> bool {
        let Some(cards) = site.get_mut("cards").and_then(Value::as_array_mut) else {
            return false;
        };

        let mut changed = false;
        for card in cards.iter_mut().filter_map(Value::as_object_mut) {
            let Some(data) = card.remove("data") else {
                continue;
            };
            changed = true;
            let has_content = card.get("content").is_some_and(|c| !c.is_null());
            if !has_content {
                card.insert("content".to_string(), data);
            }
        }
        changed
    }
}
