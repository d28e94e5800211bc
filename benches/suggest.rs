use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spellfix::checker::{check_spelling, edit_distance, suggest, tokenize, Carousel, Dictionary};

fn word_list() -> Dictionary {
    let stems = [
        "spell", "check", "word", "letter", "carousel", "suggest", "replace", "dictionary",
        "token", "offset", "distance", "capital", "correct", "review", "text",
    ];
    let suffixes = ["", "s", "ed", "ing", "er", "ers", "ion", "able"];
    stems
        .iter()
        .flat_map(|stem| suffixes.iter().map(move |suffix| format!("{stem}{suffix}")))
        .collect()
}

fn bench_edit_distance(c: &mut Criterion) {
    c.bench_function("edit_distance", |b| {
        b.iter(|| edit_distance(black_box("dictoinary"), black_box("dictionary")))
    });
}

fn bench_suggest(c: &mut Criterion) {
    let dictionary = word_list();
    c.bench_function("suggest", |b| b.iter(|| suggest(black_box("speling"), &dictionary)));
}

fn bench_pass(c: &mut Criterion) {
    let dictionary = word_list();
    let text = "Teh spelling checkr reviews evry word, suggests replacments and corects text. "
        .repeat(50);

    c.bench_function("check_and_suggest", |b| {
        b.iter(|| {
            let mut carousel: Carousel = check_spelling(&tokenize(black_box(&text)), &dictionary);
            for index in 0..carousel.len() {
                black_box(carousel.suggestions_for(index, &dictionary).map(|s| s.len()).ok());
            }
        })
    });
}

criterion_group!(benches, bench_edit_distance, bench_suggest, bench_pass);
criterion_main!(benches);
