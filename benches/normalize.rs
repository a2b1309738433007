use std::sync::Arc;

use bevy::{
    image::Image,
    prelude::*,
    render::render_resource::{Extent3d, TextureDescriptor, TextureFormat},
};
use criterion::{
    BenchmarkId,
    criterion_group,
    criterion_main,
    Criterion,
    Throughput,
};

use bevy_texture_array::{
    ImageArrayBinder,
    ImageSlice,
    TextureArray,
    image::mip_level_byte_len,
    normalize,
};


const SLICE_COUNTS: [usize; 3] = [
    4,
    16,
    64,
];

const SLICE_SIZE: u32 = 256;
const SLICE_LEVELS: u32 = 9;

fn slice_with_chain(seed: u8) -> ImageSlice {
    let format = TextureFormat::Rgba8Unorm;
    let len: usize = (0..SLICE_LEVELS)
        .filter_map(|level| mip_level_byte_len(format, SLICE_SIZE, SLICE_SIZE, level))
        .sum();

    Arc::new(Image {
        data: Some(vec![seed; len]),
        texture_descriptor: TextureDescriptor {
            size: Extent3d {
                width: SLICE_SIZE,
                height: SLICE_SIZE,
                depth_or_array_layers: 1,
            },
            format,
            mip_level_count: SLICE_LEVELS,
            ..Image::default().texture_descriptor
        },
        ..default()
    })
}

fn normalize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize texture arrays");
    for count in SLICE_COUNTS.iter() {
        let slices: Vec<_> = (0..*count).map(|seed| slice_with_chain(seed as u8)).collect();
        let bytes: usize = slices.iter().filter_map(|slice| slice.data.as_ref().map(Vec::len)).sum();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(
            BenchmarkId::new("transpose", count),
            &slices,
            |b, slices| {
                let source = vec![slices.clone()];
                b.iter(|| normalize(&source));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("pack", count),
            &slices,
            |b, slices| {
                b.iter(|| {
                    let mut texture = TextureArray::new(ImageArrayBinder::default());
                    let _ = texture.set_mipmaps(vec![slices.clone()]);
                    texture.into_binder().take_image()
                });
            },
        );
    }
}

criterion_group!{
    name = normalize_benches;
    config = Criterion::default().sample_size(10);
    targets = normalize_benchmark
}
criterion_main!(normalize_benches);
