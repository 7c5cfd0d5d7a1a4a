use super::AnimationMode;
use std::f64::consts::TAU;

const BASE_RADIUS: f64 = 80.0;
const PARTICLE_COUNT: usize = 20;
const RECORDING_BARS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Color {
    Color { r, g, b, a }
}

/// Drawing primitives; the platform turns these into canvas calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled circle with a radial gradient from `inner` at the centre to
    /// `outer` at the rim.
    RadialCircle {
        x: f64,
        y: f64,
        radius: f64,
        inner: Color,
        outer: Color,
    },
    Dot {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: AnimationMode,
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone)]
struct Particle {
    angle: f64,
    radius: f64,
    speed: f64,
    size: f64,
    opacity: f64,
}

/// Computes animation frames for the current mode. Keeps only its own clock
/// and particles; it knows nothing about requests or recording.
#[derive(Debug, Clone)]
pub struct Renderer {
    width: f64,
    height: f64,
    time: f64,
    particles: Vec<Particle>,
}

impl Renderer {
    pub fn new(width: f64, height: f64, rng: &mut fastrand::Rng) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|i| Particle {
                angle: (i as f64 / PARTICLE_COUNT as f64) * TAU,
                radius: BASE_RADIUS + rng.f64() * 40.0,
                speed: 0.01 + rng.f64() * 0.02,
                size: 2.0 + rng.f64() * 3.0,
                opacity: 0.3 + rng.f64() * 0.7,
            })
            .collect();

        Self {
            width,
            height,
            time: 0.0,
            particles,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn frame(&mut self, mode: AnimationMode) -> Frame {
        let shapes = match mode {
            AnimationMode::Idle => self.idle(),
            AnimationMode::Thinking => self.thinking(),
            AnimationMode::Recording => self.recording(),
        };

        Frame {
            mode,
            width: self.width,
            height: self.height,
            shapes,
        }
    }

    /// Soft base circle with particles orbiting it.
    fn idle(&mut self) -> Vec<Shape> {
        let (cx, cy) = self.center();
        let time = self.time;
        let mut shapes = Vec::with_capacity(PARTICLE_COUNT + 1);

        shapes.push(Shape::RadialCircle {
            x: cx,
            y: cy,
            radius: BASE_RADIUS,
            inner: rgba(102, 126, 234, 0.3),
            outer: rgba(118, 75, 162, 0.1),
        });

        for particle in &mut self.particles {
            particle.angle += particle.speed;
            shapes.push(Shape::Dot {
                x: cx + particle.angle.cos() * particle.radius,
                y: cy + particle.angle.sin() * particle.radius,
                radius: particle.size,
                color: rgba(
                    255,
                    255,
                    255,
                    particle.opacity * (0.5 + 0.5 * (time * 2.0 + particle.angle).sin()),
                ),
            });
        }

        self.time += 0.02;
        shapes
    }

    /// Three overlapping pulsing circles.
    fn thinking(&mut self) -> Vec<Shape> {
        let (cx, cy) = self.center();
        let shapes = (0..3)
            .map(|i| {
                let i = i as f64;
                Shape::RadialCircle {
                    x: cx,
                    y: cy,
                    radius: BASE_RADIUS + (self.time * 3.0 + i).sin() * 20.0,
                    inner: rgba(255, 165, 2, 0.3 - i * 0.1),
                    outer: rgba(255, 99, 72, 0.0),
                }
            })
            .collect();

        self.time += 0.05;
        shapes
    }

    /// Pulsing circle ringed by sound-wave bars.
    fn recording(&mut self) -> Vec<Shape> {
        let (cx, cy) = self.center();
        let time = self.time;
        let mut shapes = Vec::with_capacity(RECORDING_BARS + 1);

        shapes.push(Shape::RadialCircle {
            x: cx,
            y: cy,
            radius: BASE_RADIUS + (time * 10.0).sin() * 10.0,
            inner: rgba(255, 71, 87, 0.4),
            outer: rgba(255, 55, 66, 0.1),
        });

        let start_radius = BASE_RADIUS + 20.0;
        for i in 0..RECORDING_BARS {
            let angle = (i as f64 / RECORDING_BARS as f64) * TAU;
            let bar_height = 20.0 + (time * 8.0 + i as f64 * 0.5).sin() * 15.0;
            let end_radius = start_radius + bar_height;

            shapes.push(Shape::Line {
                from: (cx + angle.cos() * start_radius, cy + angle.sin() * start_radius),
                to: (cx + angle.cos() * end_radius, cy + angle.sin() * end_radius),
                width: 3.0,
                color: rgba(255, 255, 255, 0.6 + 0.4 * (time * 6.0 + i as f64).sin()),
            });
        }

        self.time += 0.1;
        shapes
    }
}
