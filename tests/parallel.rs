//! Lanewise kernels run from many threads over shared and disjoint buffers.

use lanewise::simd::{Simd, VectorBuf};
use rayon::prelude::*;

type F64x4 = Simd<f64, 4>;

#[test]
fn test_parallel_map_over_buffer_matches_sequential() {
    let data: Vec<f64> = (0..100_000).map(|i| if i % 2 == 0 { i as f64 } else { -(i as f64) }).collect();
    let buf = VectorBuf::<F64x4>::from_scalars(&data).unwrap();

    let parallel: Vec<F64x4> = buf.par_iter().map(|v| v.abs().sqrt()).collect();
    let sequential: Vec<F64x4> = buf.iter().map(|v| v.abs().sqrt()).collect();
    assert_eq!(parallel, sequential);

    let lanes = parallel.iter().flat_map(|v| v.to_array()).take(data.len());
    for (i, val) in lanes.enumerate() {
        assert!((val - (i as f64).sqrt()).abs() < 1e-12, "index {}: {}", i, val);
    }
}

#[test]
fn test_parallel_in_place_update() {
    let mut buf = VectorBuf::<Simd<i32, 8>>::from_fn(1024, |i| Simd::splat(i as i32)).unwrap();

    buf.par_iter_mut().for_each(|v| {
        *v = *v * 2 + Simd::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
    });

    for (i, v) in buf.iter().enumerate() {
        let base = 2 * i as i32;
        assert_eq!(v.to_array(), core::array::from_fn(|lane| base + lane as i32));
    }
}

#[test]
fn test_parallel_reduction() {
    let data: Vec<u64> = (1..=4096).collect();
    let buf = VectorBuf::<Simd<u64, 8>>::from_scalars(&data).unwrap();

    let total: u64 = buf.par_iter().map(|v| v.reduce_sum()).sum();
    assert_eq!(total, 4096 * 4097 / 2);
}
