#![allow(unused_macros)]

// ----------------------
// Layout related macros
// ----------------------

// These max/min macros were borrowed
// from the max_min_macros crate by Emanuel Claesson

macro_rules! min {
    ($x: expr) => ($x);
    ($x: expr, $($xs: expr), +) => {
        {
            f32::min($x, min!($($xs), +))
        }
    }
}

macro_rules! max {
    ($x: expr) => ($x);
    ($x: expr, $($xs: expr), +) => {
        {
            f32::max($x, max!($($xs), +))
        }
    }
}

// ----------------------
// Testing related macros
// ----------------------

macro_rules! assert_close {
    ($x:expr, $y:expr, $epsilon:expr) => {
        {
            let (x, y, epsilon) = ($x, $y, $epsilon);
            assert!(
                (x - y).abs() <= epsilon,
                "Assertion failed: `abs(left - right) <= epsilon`, with `left` = {:?}, `right` = {:?}, `epsilon` = {:?}",
                x,
                y,
                epsilon
            );
        }
    };
}
