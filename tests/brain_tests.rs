#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::brain::{Genome, Topology};
use flappy_evo::simulation::error::SimError;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_genome(seed: u64) -> Genome {
    let mut rng = StdRng::seed_from_u64(seed);
    Genome::random(Topology::PERCEPTRON, 0.5, &mut rng)
}

#[test]
fn test_random_genome_shape_and_range() {
    let genome = random_genome(7);

    assert_eq!(genome.topology(), Topology::PERCEPTRON);
    assert_eq!(genome.biases().len(), 8);
    assert_eq!(genome.weights().len(), 2 * 5 + 5);
    assert!(genome.biases().iter().all(|b| (-0.5..0.5).contains(b)));
    assert!(genome.weights().iter().all(|w| (-0.5..0.5).contains(w)));
}

#[test]
fn test_same_seed_same_genome() {
    assert_eq!(random_genome(11), random_genome(11));
    assert_ne!(random_genome(11), random_genome(12));
}

#[test]
fn test_evaluate_matches_hand_computed_forward_pass() {
    let topology = Topology {
        inputs: 2,
        hidden: 1,
        outputs: 1,
    };
    // biases: [in0, in1, hidden, out]; weights: [in0->h, in1->h, h->out]
    let genome =
        Genome::from_parts(topology, vec![9.0, 9.0, 0.5, -1.0], vec![1.0, -2.0, 3.0]).unwrap();

    let sigmoid = |x: f32| 1.0 / (1.0 + (-x).exp());
    let hidden = sigmoid(0.2 * 1.0 + 0.4 * -2.0 + 0.5);
    let expected = sigmoid(hidden * 3.0 - 1.0);

    let output = genome.evaluate(&[0.2, 0.4]).unwrap();
    assert!((output - expected).abs() < 1e-6);
}

#[test]
fn test_input_biases_do_not_affect_output() {
    let weights = vec![0.3; 15];
    let mut biases = vec![0.1; 8];
    let a = Genome::from_parts(Topology::PERCEPTRON, biases.clone(), weights.clone()).unwrap();
    biases[0] = 40.0;
    biases[1] = -40.0;
    let b = Genome::from_parts(Topology::PERCEPTRON, biases, weights).unwrap();

    assert_eq!(
        a.evaluate(&[0.5, 0.25]).unwrap(),
        b.evaluate(&[0.5, 0.25]).unwrap()
    );
}

#[test]
fn test_evaluate_rejects_wrong_input_count() {
    let genome = random_genome(3);

    assert!(matches!(
        genome.evaluate(&[0.5]),
        Err(SimError::Configuration(_))
    ));
    assert!(matches!(
        genome.evaluate(&[0.5, 0.5, 0.5]),
        Err(SimError::Configuration(_))
    ));
}

#[test]
fn test_from_parts_rejects_mismatched_lengths() {
    let too_few_biases = Genome::from_parts(Topology::PERCEPTRON, vec![0.0; 7], vec![0.0; 15]);
    assert!(matches!(too_few_biases, Err(SimError::Configuration(_))));

    let too_many_weights = Genome::from_parts(Topology::PERCEPTRON, vec![0.0; 8], vec![0.0; 16]);
    assert!(matches!(too_many_weights, Err(SimError::Configuration(_))));

    let empty_layer = Genome::from_parts(
        Topology {
            inputs: 2,
            hidden: 0,
            outputs: 1,
        },
        vec![0.0; 3],
        vec![],
    );
    assert!(matches!(empty_layer, Err(SimError::Configuration(_))));
}

#[test]
fn test_json_dump_restores_identical_genome() {
    let genome = random_genome(21);

    let json = genome.to_json().unwrap();
    let restored: Genome = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, genome);
    assert!(json.contains("\"topology\""));
}

#[test]
fn test_json_with_wrong_gene_count_is_rejected() {
    let json = r#"{
        "topology": { "inputs": 2, "hidden": 5, "outputs": 1 },
        "biases": [0.0, 0.0, 0.0],
        "weights": []
    }"#;

    let result: Result<Genome, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

proptest! {
    #[test]
    fn prop_evaluate_is_pure_and_bounded(
        seed in any::<u64>(),
        dx in -2.0f32..2.0,
        dy in -2.0f32..2.0,
    ) {
        let genome = random_genome(seed);

        let first = genome.evaluate(&[dx, dy]).unwrap();
        let second = genome.evaluate(&[dx, dy]).unwrap();

        prop_assert_eq!(first.to_bits(), second.to_bits());
        prop_assert!(first.is_finite());
        prop_assert!((0.0..=1.0).contains(&first));
    }
}
