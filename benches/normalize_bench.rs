//! Benchmark for the normalization pass
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use caffe_normalizer::proto::extensions::{make_layer, make_net};
use caffe_normalizer::proto::NetParameter;
use caffe_normalizer::transformers::normalize_net;

/// Chain of conv/relu pairs where every conv top needs a rename
fn build_mismatched_net(pairs: usize) -> NetParameter {
    let mut layers = Vec::with_capacity(pairs * 2 + 1);
    layers.push(make_layer("Input", &[], &["data"], "input"));

    let mut bottom = "data".to_string();
    for i in 0..pairs {
        let conv_name = format!("conv{i}");
        let relu_name = format!("relu{i}");
        let top = format!("conv_out{i}");
        layers.push(make_layer(
            "Convolution",
            &[bottom.as_str()],
            &[top.as_str()],
            &conv_name,
        ));
        layers.push(make_layer("ReLU", &[top.as_str()], &[top.as_str()], &relu_name));
        bottom = top;
    }

    make_net("bench", layers)
}

fn normalize_benchmark(c: &mut Criterion) {
    let net = build_mismatched_net(256);

    c.bench_function("normalize_512_layers", |b| {
        b.iter(|| {
            let mut net = net.clone();
            black_box(normalize_net(&mut net))
        })
    });
}

criterion_group!(benches, normalize_benchmark);
criterion_main!(benches);
