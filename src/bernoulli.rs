use rug::{Integer, Rational};

/// Tangent numbers `T_1..=T_n` (index 0 holds `T_1`).
///
/// Brent and Harvey's in-place recurrence: every intermediate value is a
/// nonnegative integer, so no rational arithmetic is needed.
pub fn tangent_numbers(n: usize) -> Vec<Integer> {
    if n == 0 {
        return Vec::new();
    }
    let mut t = vec![Integer::new(); n + 1];
    t[1] = Integer::from(1);
    for k in 2..=n {
        t[k] = Integer::from(&t[k - 1] * (k as u64 - 1));
    }
    for k in 2..=n {
        for j in k..=n {
            let carried = Integer::from(&t[j - 1] * (j - k) as u64);
            t[j] *= (j - k + 2) as u64;
            t[j] += carried;
        }
    }
    t.remove(0);
    t
}

/// Exact `B_0, B_2, .., B_{2m}`; entry `k` holds `B_{2k}`.
pub fn even_bernoulli_numbers(m: usize) -> Vec<Rational> {
    let mut numbers = Vec::with_capacity(m + 1);
    numbers.push(Rational::from(1));
    for (index, t) in tangent_numbers(m).into_iter().enumerate() {
        let k = index + 1;
        // B_2k = (-1)^(k-1) 2k T_k / (4^k (4^k - 1))
        let four_k = Integer::from(1) << (2 * k as u32);
        let den = Integer::from(&four_k - 1) * &four_k;
        let mut num = t * (2 * k as u64);
        if k % 2 == 0 {
            num = -num;
        }
        numbers.push(Rational::from((num, den)));
    }
    numbers
}
