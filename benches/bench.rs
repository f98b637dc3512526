//! Criterion benchmarks for the ujaran classifier.
//!
//! Covers the hot paths of training and inference:
//! - Text preprocessing
//! - Spelling correction
//! - TF-IDF fitting and Naive Bayes scoring

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use ujaran::analysis::Preprocessor;
use ujaran::ml::{MultinomialNaiveBayes, TfIdfVectorizer};
use ujaran::spelling::{CorrectorConfig, SpellingCorrector, SpellingDictionary};

/// Generate synthetic social media posts.
fn generate_posts(count: usize) -> Vec<String> {
    let words = [
        "saya", "yg", "gak", "agama", "ras", "mereka", "sesat", "jahat", "makanan", "enak",
        "bgt", "kafir", "bodoh", "pergi", "pasar", "berteman", "dgn", "semua", "orang", "baik",
    ];

    (0..count)
        .map(|i| {
            let len = 8 + i % 12;
            let mut post: Vec<String> = (0..len)
                .map(|j| words[(i * 7 + j * 3) % words.len()].to_string())
                .collect();
            if i % 3 == 0 {
                post.insert(0, format!("@user{i}"));
                post.push("http://t.co/abc".to_string());
            }
            post.join(" ")
        })
        .collect()
}

fn bench_preprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocessing");
    let posts = generate_posts(100);
    let preprocessor = Preprocessor::new();

    group.bench_function("preprocess_single_post", |b| {
        b.iter(|| preprocessor.preprocess(black_box(&posts[0])).unwrap());
    });

    group.throughput(Throughput::Elements(posts.len() as u64));
    group.bench_function("preprocess_batch_posts", |b| {
        b.iter(|| {
            for post in &posts {
                black_box(preprocessor.preprocess(post).unwrap());
            }
        });
    });

    group.finish();
}

fn bench_spell_correction(c: &mut Criterion) {
    let mut group = c.benchmark_group("spell_correction");
    group.sample_size(20);

    let preprocessor = Preprocessor::new();
    let corpus: Vec<Vec<String>> = generate_posts(500)
        .iter()
        .map(|p| preprocessor.tokenize(p).unwrap())
        .collect();
    let dictionary = Arc::new(SpellingDictionary::from_corpus(&corpus, 2));
    let corrector = SpellingCorrector::with_config(dictionary, CorrectorConfig::default());
    let misspellings = ["agma", "jahta", "makann", "pasra", "orng", "sesta", "berteman"];

    group.bench_function("correct_single_word", |b| {
        b.iter(|| corrector.correct(black_box("agma")));
    });

    group.throughput(Throughput::Elements(misspellings.len() as u64));
    group.bench_function("correct_batch_words", |b| {
        b.iter(|| {
            for word in &misspellings {
                black_box(corrector.correct(word));
            }
        });
    });

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    group.sample_size(20);

    let preprocessor = Preprocessor::new();
    let documents: Vec<Vec<String>> = generate_posts(600)
        .iter()
        .map(|p| preprocessor.preprocess(p).unwrap())
        .collect();
    let labels: Vec<usize> = (0..documents.len()).map(|i| i % 3).collect();

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("tfidf_fit_transform", |b| {
        b.iter(|| {
            let mut vectorizer = TfIdfVectorizer::new(Some(200));
            vectorizer.fit_transform(black_box(&documents)).unwrap()
        });
    });

    let mut vectorizer = TfIdfVectorizer::new(Some(200));
    let x = vectorizer.fit_transform(&documents).unwrap();

    group.bench_function("naive_bayes_fit", |b| {
        b.iter(|| {
            let mut model = MultinomialNaiveBayes::new(2.0).unwrap();
            model.fit(black_box(&x), &labels).unwrap();
            model
        });
    });

    let mut model = MultinomialNaiveBayes::new(2.0).unwrap();
    model.fit(&x, &labels).unwrap();

    group.bench_function("naive_bayes_predict_proba", |b| {
        b.iter(|| model.predict_proba(black_box(&x)).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_preprocessing,
    bench_spell_correction,
    bench_classification
);
criterion_main!(benches);
