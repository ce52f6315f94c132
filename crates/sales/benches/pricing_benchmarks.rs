use std::collections::HashMap;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use visio_core::Money;
use visio_products::ProductId;
use visio_sales::{LineItemRequest, ProductQuote, price_order};

fn bench_price_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricing");

    for line_count in [1usize, 10, 100] {
        let mut lookup = HashMap::new();
        let mut items = Vec::with_capacity(line_count);

        for i in 0..line_count {
            let id = ProductId::new();
            let unit_price = Money::new(Decimal::new(999 + i as i64, 2)).unwrap();
            lookup.insert(id, ProductQuote { unit_price, stock_on_hand: 1_000 });
            items.push(LineItemRequest { product_id: id, quantity: (i as i64 % 5) + 1 });
        }

        group.bench_function(format!("price_order/{line_count}_lines"), |b| {
            b.iter(|| price_order(black_box(&items), black_box(&lookup)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_price_order);
criterion_main!(benches);
