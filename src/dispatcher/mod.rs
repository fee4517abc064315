//! Keyword-driven chat replies.
//!
//! A message is lower-cased and tested against [`RULES`] in order; the first
//! rule with a keyword contained in the message supplies the reply. Messages
//! matching nothing get [`FALLBACK_REPLY`], which lists the topics we cover.
//! The order is part of the behaviour: "organic rice" is answered as rice.

pub const FALLBACK_REPLY: &str = include_str!("replies/fallback.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Tomato,
    Potato,
    Rice,
    SoilPh,
    OrganicFertilizer,
    Monsoon,
}

pub struct Rule {
    pub topic: Topic,
    /// Lower-case needles; Kannada script has no case so it is listed as-is.
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

pub static RULES: [Rule; 6] = [
    Rule {
        topic: Topic::Tomato,
        keywords: &["ಟೊಮೇಟೊ", "tomato"],
        reply: include_str!("replies/tomato.txt"),
    },
    Rule {
        topic: Topic::Potato,
        keywords: &["ಆಲೂಗಡ್ಡೆ", "potato"],
        reply: include_str!("replies/potato.txt"),
    },
    Rule {
        topic: Topic::Rice,
        keywords: &["ಬತ್ತ", "rice"],
        reply: include_str!("replies/rice.txt"),
    },
    Rule {
        topic: Topic::SoilPh,
        keywords: &["ph", "ಪಿಹೆಚ್"],
        reply: include_str!("replies/soil_ph.txt"),
    },
    Rule {
        topic: Topic::OrganicFertilizer,
        keywords: &["ಸಾವಯವ", "ಗೊಬ್ಬರ", "organic"],
        reply: include_str!("replies/organic_fertilizer.txt"),
    },
    Rule {
        topic: Topic::Monsoon,
        keywords: &["ಮಾನ್ಸೂನ್", "monsoon", "ಮಳೆ"],
        reply: include_str!("replies/monsoon.txt"),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    /// `None` when the fallback was used.
    pub topic: Option<Topic>,
    pub text: &'static str,
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

pub fn respond(message: &str) -> Reply {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map_or(
            Reply {
                topic: None,
                text: FALLBACK_REPLY,
            },
            |rule| Reply {
                topic: Some(rule.topic),
                text: rule.reply,
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reply_for(topic: Topic) -> &'static str {
        RULES
            .iter()
            .find(|r| r.topic == topic)
            .map(|r| r.reply)
            .unwrap_or_default()
    }

    #[rstest]
    #[case("How do I grow tomato?", Topic::Tomato)]
    #[case("TOMATO seedlings", Topic::Tomato)]
    #[case("ಟೊಮೇಟೊ ಬೆಳೆ ಹೇಗೆ?", Topic::Tomato)]
    #[case("potato spacing", Topic::Potato)]
    #[case("ಆಲೂಗಡ್ಡೆ", Topic::Potato)]
    #[case("best rice variety", Topic::Rice)]
    #[case("ಬತ್ತ ನಾಟಿ", Topic::Rice)]
    #[case("What is soil pH?", Topic::SoilPh)]
    #[case("ಪಿಹೆಚ್ ಮಟ್ಟ", Topic::SoilPh)]
    #[case("organic manure", Topic::OrganicFertilizer)]
    #[case("ಗೊಬ್ಬರ ಯಾವುದು", Topic::OrganicFertilizer)]
    #[case("monsoon crops", Topic::Monsoon)]
    #[case("ಮಳೆ ಬಂದಾಗ", Topic::Monsoon)]
    fn keyword_selects_topic(#[case] message: &str, #[case] topic: Topic) {
        let reply = respond(message);
        assert_eq!(reply.topic, Some(topic));
        assert_eq!(reply.text, reply_for(topic));
    }

    #[rstest]
    #[case("organic rice", Topic::Rice)]
    #[case("tomato or potato", Topic::Tomato)]
    #[case("monsoon rice", Topic::Rice)]
    #[case("organic fertilizer pH", Topic::SoilPh)]
    fn earlier_rules_win(#[case] message: &str, #[case] topic: Topic) {
        assert_eq!(respond(message).topic, Some(topic));
    }

    #[rstest]
    #[case("hello")]
    #[case("")]
    #[case("how is the market today")]
    fn unmatched_input_gets_fallback(#[case] message: &str) {
        let reply = respond(message);
        assert_eq!(reply.topic, None);
        assert_eq!(reply.text, FALLBACK_REPLY);
    }

    #[test]
    fn tomato_reply_is_verbatim() {
        let text = respond("tomato").text;
        assert!(text.starts_with("🍅 ಟೊಮೇಟೊ ಬೆಳೆ ಮಾಹಿತಿ:"));
        assert!(text.ends_with("ಇಳುವರಿ: 60-70 ದಿನಗಳಲ್ಲಿ ಸಿದ್ಧ"));
    }
}
