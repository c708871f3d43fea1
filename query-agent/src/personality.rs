//! Akoth's voice: animal prefixes, fun facts, and fallback openers.
//!
//! Everything here is a pure function over fixed string tables plus an
//! injected random source, so tests can pin behavior with a seeded RNG.

use rand::Rng;

/// Trivia lines occasionally appended to a finished answer.
pub const FUN_FACTS: [&str; 10] = [
    "🦁 Lions sleep up to 20 hours a day!",
    "🦒 A giraffe's tongue is about 20 inches long and purple!",
    "🐘 Elephants can recognize themselves in mirrors!",
    "🦓 Zebra stripes are unique to each individual!",
    "🦏 A rhino's horn is made of keratin!",
    "🦛 Hippos can hold their breath underwater for up to 5 minutes!",
    "🐆 Cheetahs can accelerate from 0 to 60 mph in 3 seconds!",
    "🦅 African fish eagles can spot prey from over 3 miles away!",
    "🦌 Wildebeest babies can stand and run within minutes of birth!",
    "🌳 Acacia trees communicate via chemical signals!",
];

/// Quirky openers used when the corpus has nothing substantial to offer.
pub const FALLBACK_INTROS: [&str; 5] = [
    "🦁 Hmm, tricky one! My database is taking a nap in the savanna...",
    "🦒 Great question! Let me stretch my neck and look around...",
    "🐘 I'm rummaging through my memory (elephants never forget!)...",
    "🦓 That's not in my herd of knowledge, but here's what I know...",
    "🌿 Ooh, that's outside my usual watering hole, but I can share this...",
];

/// Keyword → decorative prefix mapping. Scanned in definition order; the
/// first matching keyword wins, so no overlap resolution is needed.
const ANIMAL_PREFIXES: [(&str, &str); 8] = [
    ("lion", "🦁 Ah, the king of the jungle! "),
    ("elephant", "🐘 Elephants are incredible! "),
    ("giraffe", "🦒 Those long-necked beauties! "),
    ("zebra", "🦓 The striped wonders of the savanna! "),
    ("cheetah", "🐆 The fastest land animal on Earth! "),
    ("rhino", "🦏 Magnificent armored giants! "),
    ("hippo", "🦛 The river horse of Africa! "),
    ("wildebeest", "🦌 The great migrators! "),
];

/// Returns the decorative prefix for the first animal keyword found in the
/// query (case-insensitive substring match), or an empty string.
pub fn animal_prefix(query: &str) -> &'static str {
    let query_lower = query.to_lowercase();
    for (animal, prefix) in ANIMAL_PREFIXES {
        if query_lower.contains(animal) {
            return prefix;
        }
    }
    ""
}

/// With probability `chance`, appends a random trivia line to the response,
/// separated by a blank line and a sparkle marker; otherwise returns the
/// response unchanged.
pub fn append_fun_fact<R: Rng>(response: String, chance: f64, rng: &mut R) -> String {
    if rng.random::<f64>() < chance {
        let fact = FUN_FACTS[rng.random_range(0..FUN_FACTS.len())];
        return format!("{response}\n\n✨ Fun fact: {fact}");
    }
    response
}

/// Returns one randomly chosen fallback opener.
pub fn quirky_intro<R: Rng>(rng: &mut R) -> &'static str {
    FALLBACK_INTROS[rng.random_range(0..FALLBACK_INTROS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn prefix_matches_first_keyword_in_definition_order() {
        assert_eq!(
            animal_prefix("Tell me about lion prides"),
            "🦁 Ah, the king of the jungle! "
        );
        // Both keywords present: definition order decides, not query order.
        assert_eq!(
            animal_prefix("do zebras outrun elephants?"),
            "🐘 Elephants are incredible! "
        );
    }

    #[test]
    fn prefix_is_case_insensitive() {
        assert_eq!(
            animal_prefix("WHY DO HIPPOS yawn?"),
            "🦛 The river horse of Africa! "
        );
    }

    #[test]
    fn prefix_empty_when_no_keyword() {
        assert_eq!(animal_prefix("What about the weather"), "");
    }

    #[test]
    fn fun_fact_always_appends_at_chance_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = append_fun_fact("Lions are social cats.".to_string(), 1.0, &mut rng);
        assert!(out.starts_with("Lions are social cats."));
        assert!(out.contains("\n\n✨ Fun fact: "));
        let fact = out.split("✨ Fun fact: ").nth(1).expect("fact suffix");
        assert!(FUN_FACTS.contains(&fact));
    }

    #[test]
    fn fun_fact_never_appends_at_chance_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = append_fun_fact("Plain answer.".to_string(), 0.0, &mut rng);
        assert_eq!(out, "Plain answer.");
    }

    #[test]
    fn quirky_intro_comes_from_the_fixed_set() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert!(FALLBACK_INTROS.contains(&quirky_intro(&mut rng)));
        }
    }
}
