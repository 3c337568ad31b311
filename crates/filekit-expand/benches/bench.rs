#![allow(clippy::unwrap_used)]

use std::fs;

use criterion::{Criterion, criterion_group, criterion_main};
use filekit_expand::{ExpandOptions, GlobOptions, MappingOptions, expand, expand_mapping, match_paths};

const PATTERNS: &[&str] = &[
    "**/*.rs",
    "**/*.toml",
    "!target/**",
    "src/**/*.js",
    "*.md",
    "tests/**/*.test.ts",
    "{src,lib}/**/*.rs",
    "!**/generated.rs",
];

const PATHS: &[&str] = &[
    "src/main.rs",
    "Cargo.toml",
    "src/components/button.js",
    "README.md",
    "tests/unit/foo.test.ts",
    "docs/api/index.html",
    "lib/core/parser.rs",
    "lib/core/generated.rs",
    "target/debug/build.rs",
    "package.json",
    "src/index.css",
    "some/deep/nested/path/to/file.txt",
];

// -- in-memory matching --

fn bench_match_paths(c: &mut Criterion) {
    let options = GlobOptions::default();
    c.bench_function("match_paths", |b| {
        b.iter(|| match_paths(&options, PATTERNS, PATHS));
    });
}

fn bench_match_paths_match_base(c: &mut Criterion) {
    let options = GlobOptions {
        match_base: true,
        ..GlobOptions::default()
    };
    c.bench_function("match_paths_match_base", |b| {
        b.iter(|| match_paths(&options, ["*.rs", "*.js", "!*.test.ts"], PATHS));
    });
}

// -- filesystem expansion --

fn tree() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    for path in PATHS {
        let full = tmp.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, "").unwrap();
    }
    tmp
}

fn bench_expand(c: &mut Criterion) {
    let tmp = tree();
    let options = ExpandOptions::default().cwd(tmp.path());
    c.bench_function("expand", |b| {
        b.iter(|| expand(&options, PATTERNS));
    });
}

fn bench_expand_mapping(c: &mut Criterion) {
    let tmp = tree();
    let options = MappingOptions::default().cwd(tmp.path()).ext(".out");
    c.bench_function("expand_mapping", |b| {
        b.iter(|| expand_mapping(PATTERNS, "dist", &options));
    });
}

criterion_group!(
    benches,
    bench_match_paths,
    bench_match_paths_match_base,
    bench_expand,
    bench_expand_mapping
);
criterion_main!(benches);
