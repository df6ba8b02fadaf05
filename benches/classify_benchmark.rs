use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gpuprobe::{classify, request_gpu_info, IntegerQuery, RecordedContext};

pub fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_adreno_130", |b| {
        // Last entry in the model table, worst case for the token scan
        b.iter(|| classify(black_box("Adreno (TM) 130")))
    });

    c.bench_function("classify_unknown", |b| {
        b.iter(|| classify(black_box("ANGLE (Apple M1, Metal Renderer)")))
    });
}

pub fn bench_recorded_probe(c: &mut Criterion) {
    let ctx = RecordedContext::new()
        .with_renderer("Mali-G78")
        .with_extensions((0..64).map(|i| format!("GL_EXT_{}", i)))
        .with_integer(IntegerQuery::MajorVersion, 3)
        .with_integer(IntegerQuery::MinorVersion, 2)
        .with_integer(IntegerQuery::MaxComputeShaderStorageBlocks, 35)
        .with_integer(IntegerQuery::MaxComputeImageUniforms, 8)
        .with_work_group_size([512, 512, 512])
        .with_integer(IntegerQuery::MaxComputeWorkGroupInvocations, 512)
        .with_integer(IntegerQuery::MaxTextureSize, 16384)
        .with_integer(IntegerQuery::MaxImageUnits, 8)
        .with_integer(IntegerQuery::MaxArrayTextureLayers, 2048);

    c.bench_function("request_gpu_info_recorded", |b| {
        b.iter(|| {
            let mut ctx = ctx.clone();
            request_gpu_info(&mut ctx)
        })
    });
}

criterion_group!(benches, bench_classify, bench_recorded_probe);
criterion_main!(benches);
