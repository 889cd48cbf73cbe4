//! End-to-end drive of the backdrop core through fake host hooks with a
//! hand-advanced clock.

use std::cell::RefCell;
use std::rc::Rc;

use life_backdrop::engine::{
    BackdropConfig, BackdropCore, FrameStats, StatsSink, Surface, TickSource, WARMUP_STEPS,
};

struct CountingSurface {
    clears: Rc<RefCell<usize>>,
}

impl Surface for CountingSurface {
    fn clear(&mut self, _color: &str) {
        *self.clears.borrow_mut() += 1;
    }

    fn set_fill(&mut self, _color: &str) {}

    fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}
}

struct CollectingSink {
    frames: Rc<RefCell<Vec<FrameStats>>>,
}

impl StatsSink for CollectingSink {
    fn publish(&mut self, stats: FrameStats) {
        self.frames.borrow_mut().push(stats);
    }
}

struct CountingTicks {
    requests: Rc<RefCell<usize>>,
}

impl TickSource for CountingTicks {
    fn request(&mut self) {
        *self.requests.borrow_mut() += 1;
    }

    fn cancel(&mut self) {}
}

#[test]
fn backdrop_smoke_throttled_run() {
    let config = BackdropConfig::from_json(r#"{"targetFps": 10, "density": 0.3}"#)
        .expect("inline config should parse");

    let clears = Rc::new(RefCell::new(0));
    let frames = Rc::new(RefCell::new(Vec::new()));
    let requests = Rc::new(RefCell::new(0));

    let mut core = BackdropCore::new(
        &config,
        Box::new(CountingSurface {
            clears: clears.clone(),
        }),
        Box::new(CollectingSink {
            frames: frames.clone(),
        }),
        Box::new(CountingTicks {
            requests: requests.clone(),
        }),
    );

    // 128x96 window -> 64x48 grid, seeded, warmed up, drawn once.
    core.resize(128, 96);
    assert_eq!(frames.borrow().len(), 1);
    let seeded = frames.borrow()[0];
    assert!(seeded.population > 0, "a 0.3-density seed should have survivors");
    assert_eq!(seeded.generation, WARMUP_STEPS as u64);

    core.play();
    assert_eq!(*requests.borrow(), 1);

    // One simulated second of frame callbacks every 10ms. At 10fps the
    // throttle admits the steps at t = 0, 100, ..., 1000.
    let mut now = 0.0;
    while now <= 1000.0 {
        core.on_frame(now);
        now += 10.0;
    }
    assert_eq!(frames.borrow().len(), 1 + 11);
    assert_eq!(core.generation(), WARMUP_STEPS as u64 + 11);

    // Hidden tab: nothing moves until play.
    core.pause();
    let drawn = frames.borrow().len();
    core.on_frame(2000.0);
    core.on_frame(3000.0);
    assert_eq!(frames.borrow().len(), drawn);

    // Reseed restarts the field and resumes scheduling.
    core.reseed();
    assert_eq!(core.generation(), WARMUP_STEPS as u64);
    assert!(frames.borrow().len() > drawn);
    assert_eq!(*clears.borrow(), frames.borrow().len());
}
