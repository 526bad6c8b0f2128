//! Randomized checks of matcher and controller invariants.

use fuzzy_find_core::{
    Document, FinderConfig, SearchController, SearchKey, find_matches_in_str, fold_case,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALPHABET: &[char] = &['a', 'b', 'c', 'A', 'B', ' ', 'é', 'É'];

fn random_string(rng: &mut StdRng, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

#[test]
fn test_matches_are_well_formed() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2_000 {
        let text = random_string(&mut rng, 40);
        let query = random_string(&mut rng, 4);
        let folded_text = fold_case(&text);
        let folded_query = fold_case(&query);

        let matches = find_matches_in_str(&text, &query, 100);
        if folded_query.is_empty() {
            assert!(matches.is_empty());
            continue;
        }

        for m in &matches {
            assert_eq!(m.len(), folded_query.len());
            assert!(m.positions().windows(2).all(|w| w[0] < w[1]));
            for (&pos, &wanted) in m.positions().iter().zip(&folded_query) {
                assert_eq!(folded_text[pos], wanted, "text {text:?} query {query:?}");
            }
        }
        for pair in matches.windows(2) {
            assert!(pair[0].last() < pair[1].first());
        }
    }
}

#[test]
fn test_scan_respects_cap_and_restores_text() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let paragraphs: Vec<String> = (0..rng.gen_range(1..40))
            .map(|_| {
                let s = random_string(&mut rng, 60);
                if s.trim().is_empty() { "x".to_string() } else { s }
            })
            .collect();
        let mut doc = Document::from_text(&paragraphs.join("\n\n"));
        let original = doc.text();

        let mut finder = SearchController::new(FinderConfig::default());
        finder.open(&mut doc);
        let query = random_string(&mut rng, 2);
        let summary = finder.rescan_now(&mut doc, &query);

        assert!(summary.match_count <= 100);
        assert_eq!(doc.text(), original);
        let query_len = fold_case(query.trim()).len();
        // Matches never overlap, so every matched character has its own region.
        assert_eq!(doc.mark_count(), summary.match_count * query_len);

        for _ in 0..summary.match_count {
            finder.handle_key(&mut doc, SearchKey::Enter { shift: false });
        }
        assert_eq!(
            finder.current_index(),
            if summary.match_count > 0 { Some(0) } else { None }
        );

        finder.handle_key(&mut doc, SearchKey::Escape);
        assert_eq!(doc.mark_count(), 0);
        assert_eq!(doc.text(), original);
    }
}
