//! Canned chat replies for when the catalog API's assistant is unavailable.
//!
//! Replies are picked from a fixed table of livestock topics by keyword and
//! point visitors at the catalog page that answers their question.

/// Topic table: (keywords, reply). The first topic with a matching keyword wins.
const TOPICS: &[(&[&str], &str)] = &[
    (
        &["egg", "eggs", "hatching", "dozen", "incubate"],
        "We list hatching and table eggs by the dozen. Have a look at the Eggs page for \
         current breeds and availability.",
    ),
    (
        &["goat", "goats", "boer", "nubian", "kiko", "doe", "buck", "kid"],
        "We have meat and dairy goats from several breeders. Try the Goats category in the \
         catalog, and filter by gender if you're after a doe or a buck.",
    ),
    (
        &["sheep", "lamb", "lambs", "ewe", "ram", "dorper", "merino"],
        "Our sheep listings include ewes, rams and lambs. Pick Sheep in the catalog to see \
         what's available right now.",
    ),
    (
        &["cow", "cows", "cattle", "calf", "heifer", "steer", "bull", "angus"],
        "Cattle listings cover heifers, steers and breeding bulls. Choose Cattle in the \
         catalog and sort by newest to see fresh arrivals.",
    ),
    (
        &["chicken", "chickens", "poultry", "hen", "hens", "rooster", "duck", "ducks", "turkey"],
        "Poultry comes and goes quickly. Check the Poultry category, or the Eggs page if \
         you'd rather hatch your own.",
    ),
    (
        &["price", "prices", "cost", "cheap", "budget", "expensive", "how much"],
        "Every listing shows its asking price. In the catalog you can narrow results with a \
         price range and sort by newest or oldest.",
    ),
    (
        &["delivery", "deliver", "shipping", "transport", "pickup", "collect"],
        "Delivery is arranged directly with each seller. The listing page shows where the \
         animal is located so you can plan pickup.",
    ),
    (
        &["contact", "call", "phone", "email", "seller", "visit"],
        "Open any listing to see the seller's details and get in touch about a visit.",
    ),
];

const FALLBACK_REPLY: &str = "I can help you find goats, sheep, cattle, poultry or eggs. \
     Tell me what you're looking for, or browse the full catalog.";

/// Keyword-matching reply generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assistant;

impl Assistant {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Pick a reply for one visitor message.
    #[must_use]
    pub fn reply(&self, message: &str) -> &'static str {
        let lower = message.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        TOPICS
            .iter()
            .find(|(keywords, _)| {
                keywords.iter().any(|keyword| {
                    if keyword.contains(' ') {
                        lower.contains(keyword)
                    } else {
                        words.contains(keyword)
                    }
                })
            })
            .map_or(FALLBACK_REPLY, |(_, reply)| *reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_by_keyword() {
        let assistant = Assistant::new();
        assert!(assistant.reply("Do you have any Boer goats?").contains("Goats"));
        assert!(assistant.reply("LAMBS for sale").contains("Sheep"));
        assert!(assistant.reply("How much is a heifer?").contains("Cattle"));
    }

    #[test]
    fn test_earlier_topic_wins() {
        // Eggs are listed before poultry
        let reply = Assistant::new().reply("chicken eggs");
        assert!(reply.contains("Eggs page"));
        assert!(reply.starts_with("We list hatching"));
    }

    #[test]
    fn test_multi_word_keyword() {
        assert!(
            Assistant::new()
                .reply("how much would that be")
                .contains("asking price")
        );
    }

    #[test]
    fn test_whole_words_only() {
        // "kid" must not match inside "kidding"
        assert_eq!(Assistant::new().reply("just kidding"), FALLBACK_REPLY);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(Assistant::new().reply(""), FALLBACK_REPLY);
        assert_eq!(Assistant::new().reply("hello there"), FALLBACK_REPLY);
    }
}
