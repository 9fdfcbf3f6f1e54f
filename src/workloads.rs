//! Benchmark workloads
//!
//! The three fixed computations every runner times. Inputs are constants so
//! results stay comparable across languages.

use std::hint::black_box;

/// Argument of the Fibonacci workload
pub const FIBONACCI_N: u32 = 40;
/// Number of integers sorted by the sort workload
pub const SORT_COUNT: i32 = 100_000;
/// Upper bound (inclusive) of the sieve workload
pub const SIEVE_LIMIT: usize = 100_000;

/// A timed workload, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    /// Naive recursive `fib(40)`
    Fibonacci,
    /// Ascending sort of 100k descending integers
    Sort,
    /// Sieve of Eratosthenes up to 100k
    Primes,
}

impl Workload {
    /// Fixed execution order
    pub const ALL: [Workload; 3] = [Workload::Fibonacci, Workload::Sort, Workload::Primes];

    /// Label shared with the sibling runners
    pub fn test_name(&self) -> &'static str {
        match self {
            Workload::Fibonacci => "Fibonacci(40)",
            Workload::Sort => "Sort 100k integers",
            Workload::Primes => "Primes up to 100k",
        }
    }

    /// Nominal units of work used to derive throughput.
    ///
    /// Fibonacci counts as a single evaluation, so its throughput is
    /// `1000 / duration_ms`, i.e. evaluations per second.
    pub fn unit_count(&self) -> u64 {
        match self {
            Workload::Fibonacci => 1,
            Workload::Sort => SORT_COUNT as u64,
            Workload::Primes => SIEVE_LIMIT as u64,
        }
    }

    /// Run the workload to completion with its fixed input.
    ///
    /// Outputs are discarded through `black_box` so the work is not
    /// optimized away.
    pub fn run(&self) {
        match self {
            Workload::Fibonacci => {
                black_box(fibonacci(black_box(FIBONACCI_N)));
            }
            Workload::Sort => {
                let mut values = descending_input(black_box(SORT_COUNT));
                sort_integers(&mut values);
                black_box(values);
            }
            Workload::Primes => {
                black_box(sieve_of_eratosthenes(black_box(SIEVE_LIMIT)));
            }
        }
    }
}

/// Doubly recursive Fibonacci with no memoization.
///
/// Exponential on purpose: the workload measures call overhead.
pub fn fibonacci(n: u32) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}

/// `[count, count - 1, ..., 1]`; empty for `count < 1`
pub fn descending_input(count: i32) -> Vec<i32> {
    (1..=count).rev().collect()
}

/// Sort ascending in place.
pub fn sort_integers(values: &mut [i32]) {
    values.sort();
}

/// All primes `<= limit`, ascending.
pub fn sieve_of_eratosthenes(limit: usize) -> Vec<usize> {
    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    if limit > 0 {
        is_prime[1] = false;
    }

    let bound = (limit as f64).sqrt() as usize;
    for i in 2..=bound {
        if is_prime[i] {
            for j in (i * i..=limit).step_by(i) {
                is_prime[j] = false;
            }
        }
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(i, &prime)| prime.then_some(i))
        .collect()
}
