use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use folio_core::{
    DocxFormatter, Formatter, PdfFormatter, RenderDocument, filter_paragraphs, is_unwanted_text, parse_article,
};

fn bench_is_unwanted_text(c: &mut Criterion) {
    let lines = [
        "The council voted on Tuesday to expand the program, citing strong demand.",
        "THIS STORY HAS BEEN UPDATED WITH COMMENTS FROM THE MAYOR",
        "Sign up for our newsletter to get local news delivered every morning.",
        "   ",
    ];

    let mut group = c.benchmark_group("is_unwanted_text");
    for line in lines {
        group.bench_with_input(BenchmarkId::from_parameter(line.len()), line, |b, line| {
            b.iter(|| is_unwanted_text(black_box(line)))
        });
    }
    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let news = std::fs::read_to_string("../../tests/fixtures/sites/news/article.html").unwrap();
    let blog = std::fs::read_to_string("../../tests/fixtures/sites/blog/article.html").unwrap();

    let mut group = c.benchmark_group("parse_article");
    group.bench_with_input(BenchmarkId::new("news", news.len()), &news, |b, html| {
        b.iter(|| parse_article(black_box(html)))
    });
    group.bench_with_input(BenchmarkId::new("blog", blog.len()), &blog, |b, html| {
        b.iter(|| parse_article(black_box(html)))
    });
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/sites/news/article.html").unwrap();
    let article = parse_article(&html).unwrap();
    let paragraphs = filter_paragraphs(&article.body, true);
    let doc = RenderDocument::article(&article.title, &paragraphs);

    c.bench_function("render_docx", |b| b.iter(|| DocxFormatter::default().render(black_box(&doc))));
    c.bench_function("render_pdf", |b| b.iter(|| PdfFormatter::default().render(black_box(&doc))));
}

criterion_group!(benches, bench_is_unwanted_text, bench_extraction, bench_render);
criterion_main!(benches);
