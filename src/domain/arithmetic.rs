//! Bit helpers and Fibonacci numbers.

/// Number of one bits.
pub fn count_set_bits(number: u64) -> u32 {
    number.count_ones()
}

/// Bit at `position` (0 = least significant), as 0 or 1.
///
/// Positions past the width of `u64` read as 0.
pub fn get_bit(number: u64, position: u32) -> u8 {
    if position >= u64::BITS {
        return 0;
    }
    ((number >> position) & 1) as u8
}

/// Sets (`on`) or clears the bit at `position`.
///
/// Positions past the width of `u64` leave `number` unchanged.
pub fn set_bit(number: u64, position: u32, on: bool) -> u64 {
    if position >= u64::BITS {
        return number;
    }
    if on {
        number | (1 << position)
    } else {
        number & !(1 << position)
    }
}

/// Shift-and-add multiplication.
///
/// Works on magnitudes and applies the sign afterwards; overflow wraps
/// exactly like `i64::wrapping_mul`.
pub fn multiply(a: i64, b: i64) -> i64 {
    let negative = (a < 0) != (b < 0);
    let multiplicand = a.unsigned_abs();
    let mut multiplier = b.unsigned_abs();
    let mut result: u64 = 0;
    let mut position = 0;

    while multiplier != 0 {
        if multiplier & 1 == 1 {
            result = result.wrapping_add(multiplicand << position);
        }
        multiplier >>= 1;
        position += 1;
    }

    let result = result as i64;
    if negative {
        result.wrapping_neg()
    } else {
        result
    }
}

/// The `n`th Fibonacci number with F(0) = 0 and F(1) = F(2) = 1.
///
/// `None` once the value no longer fits in `u128` (n > 186).
pub fn fibonacci_nth(n: u32) -> Option<u128> {
    if n == 0 {
        return Some(0);
    }
    let (mut previous, mut current) = (0u128, 1u128);
    for _ in 1..n {
        let next = current.checked_add(previous)?;
        previous = current;
        current = next;
    }
    Some(current)
}
