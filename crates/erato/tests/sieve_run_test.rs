//! Integration tests for a full sieve run through the public API.

use std::collections::HashMap;

use erato::{
    EngineBuilder, Session, SieveError,
    color::Color,
    geometry::{Point, Rect, Size},
    grid::build_matrix,
    pacing::NoDelay,
    run_flag::RunFlag,
    surface::{FixedDisplay, RecordingSurface, Surface, SurfaceError, TextStyle},
};

/// Surface that notes the run flag every time something is drawn.
#[derive(Debug)]
struct FlagProbe {
    inner: RecordingSurface,
    flag: RunFlag,
    observed: Vec<bool>,
}

impl FlagProbe {
    fn new(flag: RunFlag, inner: RecordingSurface) -> Self {
        Self {
            inner,
            flag,
            observed: Vec::new(),
        }
    }
}

impl Surface for FlagProbe {
    fn resize(&mut self, size: Size) -> Result<(), SurfaceError> {
        self.inner.resize(size)
    }

    fn size(&self) -> Size {
        self.inner.size()
    }

    fn fill_rect(&mut self, rect: Rect, color: &Color) -> Result<(), SurfaceError> {
        self.observed.push(self.flag.is_running());
        self.inner.fill_rect(rect, color)
    }

    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        style: &TextStyle,
    ) -> Result<(), SurfaceError> {
        self.observed.push(self.flag.is_running());
        self.inner.fill_text(text, baseline, style)
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        self.inner.measure_text(text, style)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.inner.clear()
    }
}

/// Label text of every drawn cell, grouped by fill color.
fn labels_by_fill(surface: &RecordingSurface) -> HashMap<String, Vec<u32>> {
    let fills: Vec<String> = surface
        .filled_rects()
        .map(|(_, color)| color.to_string())
        .collect();
    let labels: Vec<u32> = surface
        .texts()
        .map(|text| text.parse().expect("labels are numbers"))
        .collect();
    assert_eq!(fills.len(), labels.len(), "every fill has a label");

    let mut grouped: HashMap<String, Vec<u32>> = HashMap::new();
    for (fill, label) in fills.into_iter().zip(labels) {
        grouped.entry(fill).or_default().push(label);
    }
    grouped
}

#[test]
fn test_bound_one_hundred_marks_every_value_once() {
    let mut engine = EngineBuilder::new()
        .build(build_matrix(100), 100, &FixedDisplay(1280), RecordingSurface::new())
        .expect("Failed to build engine");

    let summary = engine.run(&mut NoDelay);
    assert!(summary.completed);

    let grouped = labels_by_fill(engine.surface());
    let blue = Color::new("blue").unwrap().to_string();
    let red = Color::new("red").unwrap().to_string();

    let mut primes = grouped[&blue].clone();
    let mut composites = grouped[&red].clone();
    primes.sort_unstable();
    composites.sort_unstable();

    assert_eq!(primes.len(), 25);
    assert_eq!(&primes[..4], &[2, 3, 5, 7]);
    assert_eq!(primes.last(), Some(&97));

    assert_eq!(composites.len(), 74);
    composites.dedup();
    assert_eq!(composites.len(), 74, "no composite is marked twice");
}

#[test]
fn test_bound_ten_scenario() {
    let grid = build_matrix(10);
    assert_eq!(grid.rows(), &[vec![2, 3, 4], vec![5, 6, 7], vec![8, 9, 10]]);

    let mut engine = EngineBuilder::new()
        .build(grid, 10, &FixedDisplay(1280), RecordingSurface::new())
        .expect("Failed to build engine");
    engine.run(&mut NoDelay);

    let grouped = labels_by_fill(engine.surface());
    let blue = Color::new("blue").unwrap().to_string();
    let red = Color::new("red").unwrap().to_string();

    assert_eq!(grouped[&blue], vec![2, 3, 5, 7]);
    assert_eq!(grouped[&red], vec![4, 6, 8, 10, 9]);
}

#[test]
fn test_bound_two_scenario() {
    let mut engine = EngineBuilder::new()
        .build(build_matrix(2), 2, &FixedDisplay(1280), RecordingSurface::new())
        .expect("Failed to build engine");

    let summary = engine.run(&mut NoDelay);

    assert_eq!(summary.primes, 1);
    assert_eq!(summary.composites, 0);
    assert_eq!(engine.surface().texts().collect::<Vec<_>>(), vec!["2"]);
}

#[test]
fn test_run_flag_lifecycle() {
    let flag = RunFlag::new();
    let surface = FlagProbe::new(flag.clone(), RecordingSurface::new());
    let mut engine = EngineBuilder::new()
        .with_run_flag(flag.clone())
        .build(build_matrix(30), 30, &FixedDisplay(1280), surface)
        .expect("Failed to build engine");

    assert!(!engine.is_running());
    engine.run(&mut NoDelay);
    assert!(!engine.is_running());

    let observed = &engine.surface().observed;
    assert!(!observed.is_empty());
    assert!(observed.iter().all(|&running| running));
}

#[test]
fn test_run_flag_released_after_fault() {
    let flag = RunFlag::new();
    let surface = FlagProbe::new(flag.clone(), RecordingSurface::new().failing_after(7));
    let mut engine = EngineBuilder::new()
        .with_run_flag(flag.clone())
        .build(build_matrix(100), 100, &FixedDisplay(1280), surface)
        .expect("Failed to build engine");

    let summary = engine.run(&mut NoDelay);

    assert!(!summary.completed);
    assert!(!flag.is_running());
    assert!(engine.surface().observed.iter().all(|&running| running));
}

#[test]
fn test_flag_is_shared_across_engines() {
    let builder = EngineBuilder::new();
    let first = builder
        .build(build_matrix(10), 10, &FixedDisplay(1280), RecordingSurface::new())
        .unwrap();
    let second = builder
        .build(build_matrix(20), 20, &FixedDisplay(1280), RecordingSurface::new())
        .unwrap();

    builder.run_flag().begin_run();
    assert!(first.is_running());
    assert!(second.is_running());
    builder.run_flag().end_run();
}

#[test]
fn test_session_rejects_invalid_inputs() {
    let mut session: Session<RecordingSurface> = Session::new(EngineBuilder::new());

    for input in ["0", "1", "5001", "3.5", ""] {
        let result = session.submit(
            input,
            &FixedDisplay(1280),
            RecordingSurface::new(),
            &mut NoDelay,
        );
        assert!(matches!(result, Err(SieveError::InvalidBound(_))));
        assert!(!session.is_running());
    }
}

#[test]
fn test_largest_bound_lays_out_on_narrow_display() {
    let mut engine = EngineBuilder::new()
        .build(build_matrix(5000), 5000, &FixedDisplay(800), RecordingSurface::new())
        .expect("Failed to build engine");

    // 71 x 71 grid: floor(800 / 72) = 11
    assert_eq!(engine.layout().cell_size(), 11);
    assert_eq!(engine.layout().padding(), 1);

    let summary = engine.run(&mut NoDelay);
    assert_eq!(summary.primes, 669);
    assert_eq!(summary.primes + summary.composites, 4999);
}
