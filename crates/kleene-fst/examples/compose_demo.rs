// Compose two small transducers with epsilon moves and print every stage.
//
// Run:
//   cargo run -p kleene-fst --example compose_demo
//   RUST_LOG=kleene_fst=trace cargo run -p kleene-fst --example compose_demo

use kleene_core::{EPSILON, Real, Tropical};
use kleene_fst::random::{RandomFstConfig, random_fst};
use kleene_fst::{Fst, FstError, Operand, Strategy, pathsum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), FstError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kleene_fst=debug")),
        )
        .init();

    let mut t1: Fst<Real> = Fst::new();
    t1.set_initial(0, None);
    t1.add_arc(0, "a", "a", 1, Real(0.5));
    t1.add_arc(1, EPSILON, EPSILON, 1, Real(0.3));
    t1.set_final(1, None);

    let mut t2: Fst<Real> = Fst::new();
    t2.set_initial(0, None);
    t2.add_arc(0, EPSILON, EPSILON, 0, Real(0.4));
    t2.add_arc(0, "a", "a", 1, Real(0.5));
    t2.set_final(1, None);

    println!("T1:\n{t1}");
    println!("T2:\n{t2}");
    println!(
        "T1 augmented:\n{}",
        t1.augment_epsilon_transitions(Operand::First)
    );
    println!(
        "T2 augmented:\n{}",
        t2.augment_epsilon_transitions(Operand::Second)
    );

    let composed = t1.compose(&t2)?.freeze();
    println!("T1 ∘ T2:\n{}", *composed);

    let p1 = pathsum(&t1, Strategy::Lehmann)?;
    let p2 = pathsum(&t2, Strategy::Lehmann)?;
    let p = pathsum(&composed, Strategy::Lehmann)?;
    println!("pathsum(T1) = {p1}, pathsum(T2) = {p2}, pathsum(T1 ∘ T2) = {p}");

    let config = RandomFstConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let r1: Fst<Tropical> = random_fst(&config, &mut rng);
    let r2: Fst<Tropical> = random_fst(&config, &mut rng);
    let product = r1.compose(&r2)?;
    println!(
        "random composition: {} x {} states -> {} states, shortest distance {}",
        r1.num_states(),
        r2.num_states(),
        product.num_states(),
        pathsum(&product, Strategy::Lehmann)?
    );
    Ok(())
}
