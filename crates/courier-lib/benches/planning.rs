use courier_lib::{
    AnnealingConfig, Coordinate, DeliveryPlanner, DeliveryRequest, GeoGraph, PointToPointRouter,
    RawSegment, RouteAlgorithm, StreetRecord, TourOptimizer,
};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

const SIZE: usize = 30;

fn text(row: usize, col: usize) -> (String, String) {
    (
        format!("{:.7}", 34.0 + row as f64 * 0.001),
        format!("{:.7}", -118.0 + col as f64 * 0.001),
    )
}

fn coord(row: usize, col: usize) -> Coordinate {
    let (lat, lon) = text(row, col);
    Coordinate::parse(&lat, &lon).expect("grid coordinate is valid")
}

fn raw(from: (usize, usize), to: (usize, usize)) -> RawSegment {
    let (start_lat, start_lon) = text(from.0, from.1);
    let (end_lat, end_lon) = text(to.0, to.1);
    RawSegment::new(start_lat, start_lon, end_lat, end_lon)
}

static GRID: Lazy<GeoGraph> = Lazy::new(|| {
    let mut records = Vec::new();
    for i in 0..SIZE {
        records.push(StreetRecord::new(
            format!("Row {i} Street"),
            (0..SIZE - 1).map(|j| raw((i, j), (i, j + 1))).collect(),
        ));
        records.push(StreetRecord::new(
            format!("Column {i} Avenue"),
            (0..SIZE - 1).map(|j| raw((j, i), (j + 1, i))).collect(),
        ));
    }
    GeoGraph::load(&records).expect("grid loads")
});

static STOPS: Lazy<Vec<DeliveryRequest>> = Lazy::new(|| {
    (0..12)
        .map(|i| {
            DeliveryRequest::new(
                format!("parcel {i}"),
                coord((i * 7 + 3) % SIZE, (i * 11 + 5) % SIZE),
            )
        })
        .collect()
});

fn benchmark_planning(c: &mut Criterion) {
    let graph = &*GRID;
    let start = coord(0, 0);
    let goal = coord(SIZE - 1, SIZE - 1);

    c.bench_function("astar_grid_corner_to_corner", |b| {
        let router = PointToPointRouter::new(graph);
        b.iter(|| {
            let route = router.route(&start, &goal).expect("route exists");
            black_box(route.len())
        });
    });

    c.bench_function("dijkstra_grid_corner_to_corner", |b| {
        let router = PointToPointRouter::new(graph).with_algorithm(RouteAlgorithm::Dijkstra);
        b.iter(|| {
            let route = router.route(&start, &goal).expect("route exists");
            black_box(route.len())
        });
    });

    c.bench_function("anneal_twelve_stops", |b| {
        let optimizer = TourOptimizer::new(AnnealingConfig::default());
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            black_box(optimizer.optimize(&start, &STOPS, &mut rng).final_distance)
        });
    });

    c.bench_function("plan_twelve_stops", |b| {
        let planner = DeliveryPlanner::new(graph);
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            let plan = planner.plan(&start, &STOPS, &mut rng).expect("plan exists");
            black_box(plan.commands.len())
        });
    });
}

criterion_group!(benches, benchmark_planning);
criterion_main!(benches);
