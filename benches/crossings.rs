// Copyright 2025 the Pathgeom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks of containment queries. Run with `RUSTFLAGS="--cfg nightly"`.

#![cfg(nightly)]
#![cfg_attr(nightly, feature(test))]
extern crate test;
use test::Bencher;

use pathgeom::{Path, PathIterator, Point, Rect, Shape, WindingRule};

fn blob() -> Path {
    let mut path = Path::new(WindingRule::NonZero);
    path.move_to((0.0, 50.0));
    path.curve_to((0.0, 0.0), (40.0, -10.0), (60.0, 20.0)).unwrap();
    path.quad_to((100.0, 40.0), (80.0, 80.0)).unwrap();
    path.curve_to((60.0, 120.0), (0.0, 100.0), (0.0, 50.0))
        .unwrap();
    path.close_path().unwrap();
    path
}

fn polygon(n: usize) -> Path {
    let mut path = Path::new(WindingRule::EvenOdd);
    for i in 0..n {
        let a = (i as f64) * core::f64::consts::TAU / (n as f64);
        let r = if i % 2 == 0 { 100.0 } else { 40.0 };
        let p = Point::new(r * a.cos(), r * a.sin());
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p).unwrap();
        }
    }
    path.close_path().unwrap();
    path
}

#[bench]
fn bench_contains_curves(b: &mut Bencher) {
    let path = blob();
    b.iter(|| path.contains(test::black_box(Point::new(40.0, 50.0))));
}

#[bench]
fn bench_contains_polygon(b: &mut Bencher) {
    let path = polygon(1000);
    b.iter(|| path.contains(test::black_box(Point::new(10.0, 5.0))));
}

#[bench]
fn bench_intersects_curves(b: &mut Bencher) {
    let path = blob();
    b.iter(|| path.intersects(test::black_box(Rect::new(70.0, 30.0, 90.0, 45.0))));
}

#[bench]
fn bench_flatten(b: &mut Bencher) {
    let path = blob();
    b.iter(|| path.flattened(test::black_box(0.01)).unwrap().elements().count());
}
