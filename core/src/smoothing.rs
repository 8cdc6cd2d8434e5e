use std::collections::VecDeque;

/// Glidende snitt over et fast antall samples, O(1) per push.
///
/// Summen oppdateres inkrementelt: verdien som faller ut av vinduet trekkes fra,
/// den nye legges til. `push` gir `None` til vinduet er fullt.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    buf: VecDeque<f64>,
    sum: f64,
}

impl RollingMean {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            buf: VecDeque::with_capacity(window),
            sum: 0.0,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn push(&mut self, x: f64) -> Option<f64> {
        if self.window == 0 {
            return None;
        }
        self.buf.push_back(x);
        self.sum += x;
        if self.buf.len() > self.window {
            if let Some(old) = self.buf.pop_front() {
                self.sum -= old;
            }
        }
        if self.buf.len() == self.window {
            Some(self.sum / self.window as f64)
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        self.window > 0 && self.buf.len() == self.window
    }
}

/// Alle fulle vindus-snitt; element `i` dekker `values[i..i + window]`.
pub fn rolling_means(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    let mut rm = RollingMean::new(window);
    let mut out = Vec::with_capacity(values.len() - window + 1);
    for &v in values {
        if let Some(m) = rm.push(v) {
            out.push(m);
        }
    }
    out
}

/// Høyeste vindus-snitt og start-indeksen til (første) vinduet som gir det.
/// None når serien er kortere enn vinduet.
pub fn max_rolling_mean(values: &[f64], window: usize) -> Option<(usize, f64)> {
    if window == 0 || values.len() < window {
        return None;
    }
    let mut rm = RollingMean::new(window);
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if let Some(m) = rm.push(v) {
            let start = i + 1 - window;
            match best {
                // strengt større: ved likhet beholdes tidligste vindu
                Some((_, b)) if m <= b => {}
                _ => best = Some((start, m)),
            }
        }
    }
    best
}
