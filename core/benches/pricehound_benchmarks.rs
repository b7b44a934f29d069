use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricehound::{
  format_product, select_cheapest, ContextData, Pipeline, PipelineControl, PipelineError, Price, Product, Size,
};
use tokio::runtime::Runtime;

fn catalog(len: u64) -> Vec<Product> {
  (0..len)
    .map(|i| Product {
      id: i,
      brand: "Bench".to_string(),
      name: format!("Product {}", i),
      review_rating: 4.2,
      feedbacks: i * 3,
      supplier: "Seller".to_string(),
      // Every seventh product is unpriced, prices wobble so the minimum moves around.
      sizes: if i % 7 == 0 {
        Vec::new()
      } else {
        vec![Size {
          price: Price {
            basic: 10_000,
            product: 5_000 + (i * 7919) % 3_000,
            logistics: i % 150,
          },
        }]
      },
    })
    .collect()
}

fn bench_select_cheapest(c: &mut Criterion) {
  let mut group = c.benchmark_group("SelectCheapest");
  for len in [10u64, 100, 1_000].iter() {
    let products = catalog(*len);
    group.throughput(Throughput::Elements(*len));
    group.bench_with_input(BenchmarkId::from_parameter(len), &products, |b, products| {
      b.iter(|| select_cheapest(products))
    });
  }
  group.finish();
}

fn bench_format_product(c: &mut Criterion) {
  let products = catalog(2);
  c.bench_function("FormatProduct", |b| b.iter(|| format_product(products.get(1))));
}

#[derive(Default)]
struct BenchLookup {
  products: Vec<Product>,
  reply: Option<String>,
}

fn bench_lookup_shaped_pipeline(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let mut pipeline = Pipeline::<BenchLookup, PipelineError>::new(&[("select", false, None), ("format", false, None)]);
  pipeline.on_root("select", |ctx: ContextData<BenchLookup>| {
    Box::pin(async move {
      let has_candidate = ctx.with_read(|data| select_cheapest(&data.products).is_some());
      Ok::<_, PipelineError>(if has_candidate {
        PipelineControl::Continue
      } else {
        PipelineControl::Stop
      })
    })
  });
  pipeline.on_root("format", |ctx: ContextData<BenchLookup>| {
    Box::pin(async move {
      ctx.with_write(|data| data.reply = Some(format_product(select_cheapest(&data.products))));
      Ok::<_, PipelineError>(PipelineControl::Continue)
    })
  });

  let products = catalog(100);
  c.bench_function("LookupPipeline/100", |b| {
    b.to_async(&rt).iter(|| {
      let ctx = ContextData::new(BenchLookup {
        products: products.clone(),
        reply: None,
      });
      let pipeline = &pipeline;
      async move { pipeline.run(ctx).await.unwrap() }
    })
  });
}

criterion_group!(benches, bench_select_cheapest, bench_format_product, bench_lookup_shaped_pipeline);
criterion_main!(benches);
