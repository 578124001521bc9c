//! One full recompute: input snapshot in, output snapshot out.

use tracing::debug;

use crate::balance;
use crate::demand;
use crate::diagnostics;
use crate::fleet;
use crate::params::HydraulicConstants;
use crate::relay::{self, RelaySite};
use crate::results::{Messages, Results};
use crate::sources;
use crate::state::{PerClass, WaterState};

/// Compute every result with the default fireground constants.
pub fn calculate(state: &WaterState) -> Results {
    calculate_with(state, &HydraulicConstants::default())
}

/// Compute every result with explicit constants.
///
/// Pure and deterministic: nothing is cached between calls.
pub fn calculate_with(state: &WaterState, c: &HydraulicConstants) -> Results {
    let demand = demand::total_demand(&state.demand, c);
    let sources = sources::summarize(&state.sources, state.relay.source_flow, &state.reductions);

    let site = RelaySite::new(&state.relay, sources.intake_eff, sources.rear_factor);
    let modules = PerClass::from_fn(|class| {
        relay::model(class, *state.relay.speed_kmh.get(class), &site, c)
    });

    let fleet = fleet::aggregate(
        &modules,
        &state.fleet,
        sources.intake_eff,
        state.relay.source_tons,
        c,
    );
    let balance = balance::evaluate(demand, sources.frontline, fleet.effective, &state.tanks, c);
    let diagnostics = diagnostics::diagnose(
        &fleet,
        &modules,
        sources.intake_eff,
        state.relay.source_tons,
        c,
    );

    debug!(
        demand,
        frontline = sources.frontline,
        intake_eff = sources.intake_eff,
        fleet_demand = fleet.total_demand,
        compression = fleet.compression,
        net = balance.net,
        coverage = balance.coverage,
        "water balance computed"
    );

    let messages = Messages::from_diagnostics(&diagnostics);
    Results {
        demand,
        sources,
        modules,
        fleet,
        balance,
        diagnostics,
        messages,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::state::{FrontlineSources, SourceEntry};
    use proptest::prelude::*;

    fn source_mut(sources: &mut FrontlineSources, i: usize) -> &mut SourceEntry {
        match i {
            0 => &mut sources.hydrant,
            1 => &mut sources.building_hydrant,
            2 => &mut sources.small_pump,
            3 => &mut sources.normal_pump,
            4 => &mut sources.reservoir_pump,
            _ => &mut sources.portable_pump,
        }
    }

    fn state_strategy() -> impl Strategy<Value = WaterState> {
        (
            (0.0..10.0_f64, 0.0..10.0_f64, 0.0..500.0_f64, 0.0..4.0_f64),
            prop::array::uniform6((0.0..5.0_f64, 0.0..2000.0_f64)),
            (0.0..100.0_f64, 0.0..100.0_f64),
            (0.0..5.0_f64, 0.0..4.0_f64, 0.0..10.0_f64, 0.0..12.0_f64),
            (0.0..20.0_f64, 0.0..3000.0_f64, 0.0..80.0_f64),
            prop::array::uniform4(0.0..6.0_f64),
            prop::array::uniform4(0.0..4.0_f64),
        )
            .prop_map(
                |(
                    (n15, n25, robot_flow, robot_count),
                    sources,
                    (front_pct, rear_pct),
                    (distance, lines, pressure, source_tons),
                    (work, source_flow, speed),
                    fleet,
                    tanks,
                )| {
                    let mut s = WaterState::zeroed();
                    s.demand.n15 = n15;
                    s.demand.n25 = n25;
                    s.demand.robot_flow = robot_flow;
                    s.demand.robot_count = robot_count;
                    for (i, (count, unit_flow)) in sources.into_iter().enumerate() {
                        *source_mut(&mut s.sources, i) = SourceEntry { count, unit_flow };
                    }
                    s.reductions.front_pct = front_pct;
                    s.reductions.rear_pct = rear_pct;
                    s.relay.distance_km = distance;
                    s.relay.lines = lines;
                    s.relay.pressure_kgf_cm2 = pressure;
                    s.relay.source_tons = source_tons;
                    s.relay.work_min = work;
                    s.relay.source_flow = source_flow;
                    s.relay.speed_kmh = PerClass::splat(speed);
                    s.fleet = PerClass {
                        t2: fleet[0],
                        t4: fleet[1],
                        t10: fleet[2],
                        t12: fleet[3],
                    };
                    s.tanks = PerClass {
                        t2: tanks[0],
                        t4: tanks[1],
                        t10: tanks[2],
                        t12: tanks[3],
                    };
                    s
                },
            )
    }

    proptest! {
        #[test]
        fn bounded_outputs(s in state_strategy()) {
            let r = calculate(&s);
            prop_assert!(r.demand >= 0.0);
            prop_assert!((0.0..=1.0).contains(&r.fleet.compression));
            prop_assert!((0.0..=100.0).contains(&r.balance.coverage));
            prop_assert!(r.balance.net >= 0.0);
            prop_assert!(r.balance.duration_min >= 0.0);
            prop_assert!(!r.balance.duration_min.is_nan());
            for (_, m) in r.modules.iter() {
                prop_assert!(!m.cycle_min.is_nan());
                prop_assert!(m.throughput_gpm >= 0.0);
            }
        }

        #[test]
        fn no_shortfall_means_zero_duration(s in state_strategy()) {
            let r = calculate(&s);
            if r.balance.net == 0.0 {
                prop_assert_eq!(r.balance.duration_min, 0.0);
            }
        }

        #[test]
        fn compression_is_one_when_intake_keeps_up(s in state_strategy()) {
            let r = calculate(&s);
            let intake = r.sources.intake_eff;
            if intake > 0.0 && r.fleet.total_demand > 0.0 && r.fleet.total_demand <= intake {
                prop_assert_eq!(r.fleet.compression, 1.0);
            }
        }

        #[test]
        fn adding_any_frontline_source_never_hurts(
            s in state_strategy(),
            which in prop::sample::select(vec![0usize, 1, 2, 3, 4, 5]),
        ) {
            let before = calculate(&s);
            let mut more = s.clone();
            source_mut(&mut more.sources, which).count += 1.0;
            let after = calculate(&more);

            prop_assert!(after.sources.frontline >= before.sources.frontline);
            prop_assert!(after.balance.supply >= before.balance.supply);
            prop_assert!(after.balance.coverage >= before.balance.coverage);
            prop_assert!(after.balance.net <= before.balance.net);
        }

        #[test]
        fn demand_grows_with_each_nozzle(s in state_strategy()) {
            let base = calculate(&s).demand;
            let mut a = s.clone();
            a.demand.n15 += 1.0;
            let mut b = s.clone();
            b.demand.n25 += 1.0;
            prop_assert!(calculate(&a).demand > base);
            prop_assert!(calculate(&b).demand > base);
        }

        #[test]
        fn demand_grows_with_robot_monitors(s in state_strategy()) {
            let base = calculate(&s).demand;
            let mut more_robots = s.clone();
            more_robots.demand.robot_count += 1.0;
            let mut more_flow = s.clone();
            more_flow.demand.robot_flow += 50.0;

            let with_robots = calculate(&more_robots).demand;
            let with_flow = calculate(&more_flow).demand;
            prop_assert!(with_robots >= base);
            prop_assert!(with_flow >= base);
            if s.demand.robot_flow > 1e-3 {
                prop_assert!(with_robots > base);
            }
            if s.demand.robot_count > 1e-3 {
                prop_assert!(with_flow > base);
            }
        }
    }
}
