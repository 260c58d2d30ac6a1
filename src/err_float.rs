use crate::Float;

pub const MACHINE_EPSILON: f32 = std::f32::EPSILON * 0.5;

pub const fn gamma(n: i32) -> Float {
    let n = n as Float;
    (n * MACHINE_EPSILON) / (1.0 - n * MACHINE_EPSILON)
}

pub fn next_float_up(mut v: f32) -> f32 {
    if v == std::f32::INFINITY { return v; }

    if v == -0.0 { v = 0.0 }

    let bits = v.to_bits();
    let bits = if v >= 0.0 { bits + 1 } else { bits - 1 };
    f32::from_bits(bits)
}

pub fn next_float_down(mut v: f32) -> f32 {
    if v == std::f32::NEG_INFINITY { return v; }

    if v == 0.0 { v = -0.0 }

    let bits = v.to_bits();
    let bits = if v >= 0.0 { bits - 1 } else { bits + 1 };
    f32::from_bits(bits)
}

/// A floating point value tracking a conservative running error bound, used to
/// place ray/triangle and ray/sphere intersection points reliably on the correct
/// side of the surface they were computed from.
#[derive(Clone, Copy, Debug)]
pub struct EFloat {
    v: Float,
    low: Float,
    high: Float,
}

impl EFloat {
    pub fn new(v: Float, err: Float) -> Self {
        if err == 0.0 {
            EFloat { v, low: v, high: v }
        } else {
            EFloat { v, low: next_float_down(v - err), high: next_float_up(v + err) }
        }
    }

    pub fn val(&self) -> Float { self.v }
    pub fn lower_bound(&self) -> Float { self.low }
    pub fn upper_bound(&self) -> Float { self.high }

    pub fn absolute_error(&self) -> Float {
        self.high - self.low
    }

    pub fn sqrt(self) -> Self {
        EFloat {
            v: self.v.sqrt(),
            low: next_float_down(self.low.max(0.0).sqrt()),
            high: next_float_up(self.high.sqrt()),
        }
    }
}

impl From<Float> for EFloat {
    fn from(v: Float) -> Self {
        EFloat { v, low: v, high: v }
    }
}

impl std::ops::Add for EFloat {
    type Output = EFloat;
    fn add(self, rhs: EFloat) -> EFloat {
        EFloat {
            v: self.v + rhs.v,
            low: next_float_down(self.low + rhs.low),
            high: next_float_up(self.high + rhs.high),
        }
    }
}

impl std::ops::Sub for EFloat {
    type Output = EFloat;
    fn sub(self, rhs: EFloat) -> EFloat {
        EFloat {
            v: self.v - rhs.v,
            low: next_float_down(self.low - rhs.high),
            high: next_float_up(self.high - rhs.low),
        }
    }
}

impl std::ops::Mul for EFloat {
    type Output = EFloat;
    fn mul(self, rhs: EFloat) -> EFloat {
        let prods = [
            self.low * rhs.low, self.high * rhs.low,
            self.low * rhs.high, self.high * rhs.high,
        ];
        let low = prods.iter().cloned().fold(Float::INFINITY, Float::min);
        let high = prods.iter().cloned().fold(Float::NEG_INFINITY, Float::max);
        EFloat {
            v: self.v * rhs.v,
            low: next_float_down(low),
            high: next_float_up(high),
        }
    }
}

impl std::ops::Div for EFloat {
    type Output = EFloat;
    fn div(self, rhs: EFloat) -> EFloat {
        if rhs.low < 0.0 && rhs.high > 0.0 {
            return EFloat { v: self.v / rhs.v, low: Float::NEG_INFINITY, high: Float::INFINITY };
        }
        let divs = [
            self.low / rhs.low, self.high / rhs.low,
            self.low / rhs.high, self.high / rhs.high,
        ];
        let low = divs.iter().cloned().fold(Float::INFINITY, Float::min);
        let high = divs.iter().cloned().fold(Float::NEG_INFINITY, Float::max);
        EFloat {
            v: self.v / rhs.v,
            low: next_float_down(low),
            high: next_float_up(high),
        }
    }
}

impl std::ops::Neg for EFloat {
    type Output = EFloat;
    fn neg(self) -> EFloat {
        EFloat { v: -self.v, low: -self.high, high: -self.low }
    }
}

impl PartialEq<Float> for EFloat {
    fn eq(&self, other: &Float) -> bool {
        self.v == *other
    }
}

/// Solves the quadratic `a*t^2 + b*t + c = 0` using `EFloat` error bounds, returning
/// the two roots in increasing order if real.
pub fn quadratic_efloat(a: EFloat, b: EFloat, c: EFloat) -> Option<(EFloat, EFloat)> {
    let discrim = (b.val() as f64) * (b.val() as f64) - 4.0 * (a.val() as f64) * (c.val() as f64);
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt() as Float;
    let float_root_discrim = EFloat::new(root_discrim, MACHINE_EPSILON * root_discrim);

    let q = if b.val() < 0.0 {
        (b - float_root_discrim) * EFloat::from(-0.5)
    } else {
        (b + float_root_discrim) * EFloat::from(-0.5)
    };

    let mut t0 = q / a;
    let mut t1 = c / q;
    if t0.val() > t1.val() {
        std::mem::swap(&mut t0, &mut t1);
    }
    Some((t0, t1))
}
