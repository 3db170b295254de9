use gamma_taylor::{ConstantSource, Error, GammaTaylorCache, MpfrConstants, TaylorConfig};
use rug::Float;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Default)]
struct CountingConstants {
    inner: MpfrConstants,
    euler_calls: AtomicUsize,
    bernoulli_calls: AtomicUsize,
}

impl ConstantSource for CountingConstants {
    fn pi(&self, prec: u32) -> Float {
        self.inner.pi(prec)
    }

    fn euler(&self, prec: u32) -> Float {
        self.euler_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.euler(prec)
    }

    fn bernoulli(&self, n: u32, prec: u32) -> Float {
        self.bernoulli_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.bernoulli(n, prec)
    }

    fn exp(&self, x: &Float, prec: u32) -> Float {
        self.inner.exp(x, prec)
    }
}

fn counting_cache() -> (GammaTaylorCache, Arc<CountingConstants>) {
    let constants = Arc::new(CountingConstants::default());
    let cache = GammaTaylorCache::with_config(TaylorConfig::default(), constants.clone());
    (cache, constants)
}

#[test]
fn second_request_is_served_from_cache() {
    let (cache, constants) = counting_cache();
    let first = cache.coefficients(100).unwrap();
    let euler_calls = constants.euler_calls.load(Ordering::SeqCst);
    let bernoulli_calls = constants.bernoulli_calls.load(Ordering::SeqCst);
    assert_eq!(euler_calls, 1);
    assert!(bernoulli_calls > 0);

    let second = cache.coefficients(100).unwrap();
    assert_eq!(first, second);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(constants.euler_calls.load(Ordering::SeqCst), euler_calls);
    assert_eq!(constants.bernoulli_calls.load(Ordering::SeqCst), bernoulli_calls);
}

#[test]
fn precisions_are_cached_separately() {
    let (cache, constants) = counting_cache();
    assert!(cache.is_empty());
    let a = cache.coefficients(64).unwrap();
    let b = cache.coefficients(96).unwrap();
    assert_ne!(a.len(), b.len());
    assert!(cache.contains(64) && cache.contains(96));
    assert!(!cache.contains(80));
    assert_eq!(cache.len(), 2);
    assert_eq!(constants.euler_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn errors_are_not_cached() {
    let cache = GammaTaylorCache::new();
    assert_eq!(cache.coefficients(0), Err(Error::ZeroPrecision));
    assert!(!cache.contains(0));
}

#[test]
fn concurrent_requests_compute_once() {
    let (cache, constants) = counting_cache();
    let cache = Arc::new(cache);
    let handles = (0..4)
        .map(|_| {
            let cache = cache.clone();
            thread::spawn(move || cache.coefficients(128).unwrap())
        })
        .collect::<Vec<_>>();
    let tables = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();
    assert!(tables.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(constants.euler_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cache_exposes_zeta_values() {
    let cache = GammaTaylorCache::new();
    let zeta = cache.zeta_array(10, 200).unwrap();
    assert_eq!(zeta.len(), 12);
    assert_eq!(cache.len(), 0);
}
