use glam::Vec4;

pub const CATCH_METER_STEPS: usize = 100;

const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
const WHITE: Vec4 = Vec4::ONE;

/// Progress below which a trophy fish stays white.
const TROPHY_REVEAL: f32 = 0.25;

/// Linear colour ramp quantised into `steps` discrete colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    from: Vec4,
    to: Vec4,
    steps: usize,
}

impl Gradient {
    pub fn new(from: Vec4, to: Vec4, steps: usize) -> Self {
        Self {
            from,
            to,
            steps: steps.max(1),
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Colour of step `index`; the first step is `from`, the last is `to`.
    pub fn step_color(&self, index: usize) -> Vec4 {
        if self.steps == 1 {
            return self.from;
        }
        let t = index.min(self.steps - 1) as f32 / (self.steps - 1) as f32;
        self.from.lerp(self.to, t)
    }

    /// Colour for a fraction in `[0, 1]`, indexed by `fraction * steps`.
    pub fn sample(&self, fraction: f32) -> Vec4 {
        let index = (fraction.clamp(0.0, 1.0) * self.steps as f32).floor() as usize;
        self.step_color(index)
    }
}

/// Red-to-green catch meter.
pub fn catch_meter() -> Gradient {
    Gradient::new(RED, GREEN, CATCH_METER_STEPS)
}

/// Fish colour for a bite progress in `[0, 1]`.
pub fn fish_color(progress: f32, trophy: bool) -> Vec4 {
    if trophy && progress < TROPHY_REVEAL {
        WHITE
    } else {
        catch_meter().sample(progress)
    }
}
