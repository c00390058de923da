//! # Serialization Tests
//!
//! Round-trips generator trees through the text format and checks that
//! malformed input is rejected without touching the receiver.

use fieldweave_noise::{
    FlanNoise, FoamplexNoise, FractalMode, HoneyNoise, Noise, NoiseError, NoiseRegistry,
    NoiseWrapper, RadialNoiseWrapper, SimplexNoise, ToothNoise, ValueNoise, MAX_NESTING,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_leaf(rng: &mut ChaCha8Rng) -> Box<dyn Noise> {
    let seed: i64 = rng.gen();
    match rng.gen_range(0..6) {
        0 => Box::new(HoneyNoise::with_sharpness(seed, rng.gen_range(0.01..0.99))),
        1 => Box::new(FoamplexNoise::new(seed)),
        2 => Box::new(FlanNoise::with_sharpness(
            seed,
            rng.gen_range(2..=6),
            rng.gen_range(0.001..0.999),
        )),
        3 => Box::new(ToothNoise),
        4 => Box::new(SimplexNoise::new(seed)),
        _ => Box::new(ValueNoise::new(seed)),
    }
}

fn random_mode(rng: &mut ChaCha8Rng) -> FractalMode {
    match rng.gen_range(0..4) {
        0 => FractalMode::Fbm,
        1 => FractalMode::Billow,
        2 => FractalMode::Ridged,
        _ => FractalMode::DomainWarp,
    }
}

fn random_tree(rng: &mut ChaCha8Rng, depth: usize) -> Box<dyn Noise> {
    if depth == 0 {
        return random_leaf(rng);
    }
    let inner = random_tree(rng, depth - 1);
    let base = NoiseWrapper::new(inner)
        .with_seed(rng.gen())
        .with_frequency(rng.gen_range(0.001..4.0))
        .with_fractal(random_mode(rng), rng.gen_range(1..6))
        .with_spiral(rng.gen::<bool>());
    if rng.gen::<bool>() {
        Box::new(base)
    } else {
        Box::new(
            RadialNoiseWrapper::from_base(base)
                .with_center(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0))
                .with_divisions(rng.gen_range(1..16))
                .with_mirror(rng.gen::<bool>()),
        )
    }
}

/// Test: the documented example, seed 42 and sharpness 0.6.
#[test]
fn test_honey_example_roundtrip() {
    let noise = HoneyNoise::with_sharpness(42, 0.6);
    let restored = HoneyNoise::recreate_from_string(&noise.string_serialize()).unwrap();
    assert_eq!(restored.seed(), 42);
    assert_eq!(restored.sharpness().to_bits(), 0.6f32.to_bits());
    assert_eq!(
        restored.noise_2d(1.5, 2.5).to_bits(),
        noise.noise_2d(1.5, 2.5).to_bits()
    );
}

/// Test: random trees survive the tagged format and evaluate identically.
#[test]
fn test_random_trees_roundtrip() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let registry = NoiseRegistry::with_defaults();
    for _ in 0..200 {
        let depth = rng.gen_range(0..4);
        let tree = random_tree(&mut rng, depth);
        let text = NoiseRegistry::serialize(tree.as_ref());
        let restored = registry.deserialize(&text).unwrap();

        assert!(*restored == *tree, "{text}");
        assert_eq!(NoiseRegistry::serialize(restored.as_ref()), text);
        for _ in 0..5 {
            let point: [f32; 3] = [
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
            ];
            assert_eq!(
                restored.noise(&point).to_bits(),
                tree.noise(&point).to_bits(),
                "{text}"
            );
        }
    }
}

/// Test: the untagged record of a concrete type round-trips in place.
#[test]
fn test_in_place_deserialize_replaces_configuration() {
    let source = RadialNoiseWrapper::new(Box::new(FlanNoise::new(6, 5)))
        .with_divisions(7)
        .with_center(0.5, -0.5);
    let mut target = RadialNoiseWrapper::default();
    target.string_deserialize(&source.string_serialize()).unwrap();
    assert_eq!(target, source);
    assert_eq!(target.base().wrapped().tag(), FlanNoise::TAG);
}

/// Test: every truncation of a nested record fails and leaves the receiver alone.
#[test]
fn test_truncated_records_fail_atomically() {
    let source = NoiseWrapper::new(Box::new(RadialNoiseWrapper::new(Box::new(
        HoneyNoise::with_sharpness(9, 0.4),
    ))))
    .with_fractal(FractalMode::Billow, 3);
    let text = source.string_serialize();

    let original = NoiseWrapper::new(Box::new(SimplexNoise::new(1)));
    for end in 0..text.len() {
        let mut target = original.clone();
        assert!(
            target.string_deserialize(&text[..end]).is_err(),
            "prefix {:?} was accepted",
            &text[..end]
        );
        assert_eq!(target, original);
    }
}

/// Test: specific malformations map to specific errors.
#[test]
fn test_malformed_records() {
    let mut honey = HoneyNoise::new(1);
    assert_eq!(honey.string_deserialize(""), Err(NoiseError::Empty));
    assert!(matches!(
        honey.string_deserialize("12~252`"),
        Err(NoiseError::MissingDelimiter { expected: '`', position: 0 })
    ));
    assert!(matches!(
        honey.string_deserialize("`x~252`"),
        Err(NoiseError::InvalidNumber { field: "seed", .. })
    ));
    assert!(matches!(
        honey.string_deserialize("`12~0.5`"),
        Err(NoiseError::InvalidNumber { field: "sharpness", .. })
    ));
    assert_eq!(
        honey.string_deserialize("`12~252``"),
        Err(NoiseError::TrailingData { position: 8 })
    );
    assert_eq!(honey, HoneyNoise::new(1));

    let mut wrapper = NoiseWrapper::default();
    assert_eq!(
        wrapper.string_deserialize("`Zzzz`1`~0~1~0~1~0`"),
        Err(NoiseError::UnknownTag("Zzzz".into()))
    );
    assert!(matches!(
        wrapper.string_deserialize("`Ho"),
        Err(NoiseError::TruncatedTag { position: 1 })
    ));
    assert!(matches!(
        wrapper.string_deserialize("`HonN`1~252`~0~1~0~1~2`"),
        Err(NoiseError::InvalidNumber { field: "fractal_spiral", .. })
    ));
}

fn wrapper_chain(wrappers: usize) -> Box<dyn Noise> {
    let mut noise: Box<dyn Noise> = Box::new(SimplexNoise::new(3));
    for _ in 0..wrappers {
        noise = Box::new(NoiseWrapper::new(noise));
    }
    noise
}

/// Test: nesting up to the limit reads back, one more level is rejected.
#[test]
fn test_nesting_limit() {
    let registry = NoiseRegistry::with_defaults();

    let deepest = wrapper_chain(MAX_NESTING - 1);
    let restored = registry
        .deserialize(&NoiseRegistry::serialize(deepest.as_ref()))
        .unwrap();
    assert!(*restored == *deepest);

    let too_deep = NoiseRegistry::serialize(wrapper_chain(MAX_NESTING).as_ref());
    assert!(matches!(
        registry.deserialize(&too_deep),
        Err(NoiseError::NestingTooDeep { .. })
    ));
}

/// Test: a long run of unterminated wrapper tags fails instead of recursing.
#[test]
fn test_runaway_nesting_is_an_error() {
    let registry = NoiseRegistry::with_defaults();
    for repeats in [100, 600, 20_000] {
        let text = "NoiW`".repeat(repeats);
        assert_eq!(
            registry.deserialize(&text),
            Err(NoiseError::NestingTooDeep {
                position: MAX_NESTING * 5
            })
        );
    }

    let mut wrapper = NoiseWrapper::default();
    let before = wrapper.clone();
    let text = format!("`{}", "NoiW`".repeat(600));
    assert!(matches!(
        wrapper.string_deserialize(&text),
        Err(NoiseError::NestingTooDeep { .. })
    ));
    assert_eq!(wrapper, before);
}

/// Test: a top-level tagged record can sit inside other text.
#[test]
fn test_record_span_in_surrounding_text() {
    let registry = NoiseRegistry::with_defaults();
    let tree = RadialNoiseWrapper::new(Box::new(NoiseWrapper::new(Box::new(ToothNoise))));
    let record = NoiseRegistry::serialize(&tree);
    let text = format!("header:{record}:footer");
    let span = registry.record_span(&text, 7).unwrap();
    assert_eq!(&text[span], record);
    assert!(registry.record_span(&text, 0).is_err());
}

/// Test: a generator registered by the caller takes part in nesting.
#[test]
fn test_custom_registration() {
    let registry = NoiseRegistry::with_defaults();
    registry
        .register("Sim2", || Box::new(SimplexNoise::new(0)))
        .unwrap();
    assert!(registry.contains("Sim2"));
    assert_eq!(registry.create_with_seed("Sim2", 4).unwrap().seed(), 4);

    let before = registry.tags().len();
    registry
        .register("SimN", || Box::new(SimplexNoise::new(0)))
        .unwrap();
    assert_eq!(registry.tags().len(), before);
}
