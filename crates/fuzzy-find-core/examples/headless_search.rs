use fuzzy_find_core::{Document, FinderConfig, SearchController, SearchKey};
use std::time::{Duration, Instant};

fn main() {
    let mut doc = Document::from_text(
        "The quick brown fox\njumps over the lazy dog.\n\nQuietly, the fox left.",
    );
    let mut finder = SearchController::new(FinderConfig::default());
    finder.subscribe(|event| println!("event: {event:?}"));

    finder.open(&mut doc);

    // Typing "q", "qf" in quick succession only scans once.
    let t0 = Instant::now();
    finder.on_input("q", t0);
    finder.on_input("qf", t0 + Duration::from_millis(80));
    assert!(finder.poll(&mut doc, t0 + Duration::from_millis(200)).is_none());
    let summary = finder
        .poll(&mut doc, t0 + Duration::from_millis(280))
        .expect("scan is due");
    println!("{summary:?}");

    for line in doc.render_lines() {
        let rendered: String = line
            .runs
            .iter()
            .map(|run| match run.emphasis {
                Some(_) => format!("[{}]", run.text),
                None => run.text.clone(),
            })
            .collect();
        println!("{rendered}");
    }

    finder.handle_key(&mut doc, SearchKey::Enter { shift: false });
    println!("current match: {:?}", finder.current_index());

    finder.handle_key(&mut doc, SearchKey::Escape);
    assert_eq!(doc.mark_count(), 0);
    println!("{}", doc.text());
}
