//! Randomized checks that every table entry stays inside its state set.

use bpred::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_records(seed: u64, n: usize) -> Vec<BranchRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| {
        // A small pool of program counters so entries get reused
        let pc = 0x40_0000 + 4 * rng.gen_range(0..64u32);
        let outcome = Outcome::from(rng.gen_bool(0.6));
        if rng.gen_bool(0.8) {
            BranchRecord::conditional(pc, pc + 0x100, outcome)
        } else {
            BranchRecord::unconditional(pc, pc + 0x100,
                BranchFlags::new(false, rng.gen(), rng.gen(), rng.gen()))
        }
    }).collect()
}

#[test]
fn test_counters_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut two = TwoBitCounter::INIT;
    let mut three = ThreeBitCounter::INIT;
    for _ in 0..10_000 {
        let outcome = Outcome::from(rng.gen::<bool>());
        two = two.transition(outcome);
        three = three.transition(outcome);
        assert!(TwoBitCounter::try_from(u8::from(two)).is_ok());
        assert!(ThreeBitCounter::try_from(u8::from(three)).is_ok());
    }
}

#[test]
fn test_chooser_stays_in_range() {
    for seed in 0..8 {
        let cfg = TournamentConfig { local_history_bits: 4, global_history_bits: 3 };
        let mut p = cfg.build();
        for record in random_records(seed, 5000) {
            if record.is_conditional() {
                p.train(record.pc, record.outcome);
            }
            assert!(p.chooser_value() <= 3);
            let pred = p.lookup(record.pc);
            assert!(pred.global_idx < 8);
            assert!(pred.local_idx < 16);
        }
    }
}

#[test]
fn test_gshare_counters_stay_in_range() {
    let mut p = GshareConfig { history_bits: 5 }.build();
    for record in random_records(42, 5000) {
        p.train(record.pc, record.outcome);
        assert!(p.counter(record.pc).is_ok());
    }
}

#[test]
fn test_dispatch_is_deterministic() {
    let records = random_records(7, 20_000);
    for kind in [PredictorKind::Gshare, PredictorKind::Tournament, PredictorKind::Custom] {
        let mut a = Dispatcher::with_active(Config::new(kind)).unwrap();
        let mut b = Dispatcher::with_active(Config::new(kind)).unwrap();
        let sa = bpred::sim::evaluate(&mut a, &records);
        let sb = bpred::sim::evaluate(&mut b, &records);
        assert_eq!(sa.global_brns(), sb.global_brns());
        assert_eq!(sa.global_hits(), sb.global_hits());
    }
}
