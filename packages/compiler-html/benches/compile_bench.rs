use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailblock_compiler_html::{html_to_plain_text, serialize};
use mailblock_model::{template_for, Block, BlockType, IDGenerator, StyleKey};

fn newsletter(sections: usize) -> Vec<Block> {
    let mut ids = IDGenerator::new("bench");
    let mut blocks = vec![template_for(BlockType::Header).instantiate(&mut ids)];

    for i in 0..sections {
        blocks.push(
            template_for(BlockType::Text)
                .instantiate(&mut ids)
                .with_content(format!("<p>Story {} with <strong>markup</strong></p>", i)),
        );
        let mut image = template_for(BlockType::Image).instantiate(&mut ids);
        image.styles.set(StyleKey::ImageUrl, format!("https://img.test/{}.png", i));
        blocks.push(image);
        blocks.push(template_for(BlockType::Columns).instantiate(&mut ids));
        blocks.push(template_for(BlockType::Divider).instantiate(&mut ids));
    }

    blocks.push(template_for(BlockType::Button).instantiate(&mut ids));
    for (order, block) in blocks.iter_mut().enumerate() {
        block.order = order;
    }
    blocks
}

fn serialize_small(c: &mut Criterion) {
    let blocks = newsletter(2);
    c.bench_function("serialize_small_newsletter", |b| {
        b.iter(|| serialize(black_box(&blocks)))
    });
}

fn serialize_large(c: &mut Criterion) {
    let blocks = newsletter(50);
    c.bench_function("serialize_large_newsletter", |b| {
        b.iter(|| serialize(black_box(&blocks)))
    });
}

fn plain_text_large(c: &mut Criterion) {
    let html = serialize(&newsletter(50));
    c.bench_function("plain_text_large_newsletter", |b| {
        b.iter(|| html_to_plain_text(black_box(&html)))
    });
}

criterion_group!(benches, serialize_small, serialize_large, plain_text_large);
criterion_main!(benches);
