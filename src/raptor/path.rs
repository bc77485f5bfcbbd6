use crate::{
    raptor::state::{Label, SearchState},
    shared::time::Time,
};

/// One backtracked movement, before journey assembly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PathStep {
    pub kind: StepKind,
    pub from: u32,
    pub to: u32,
    pub depart: Time,
    pub arrive: Time,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum StepKind {
    Ride {
        route_idx: u32,
        trip_idx: u32,
        board_pos: u32,
        alight_pos: u32,
    },
    Walk,
}

/// Walks the labels backward from the chosen target and round.
///
/// A walk label never closes a round: its source stop was improved by a
/// vehicle in the same round (or is a search source), so consuming a walk
/// keeps the round and the next iteration picks up the ride beneath it.
/// The chain comes out reversed and is flipped before returning. An empty
/// chain means the target needed no movement at all; the caller treats
/// that as "no journey".
pub(crate) fn backtrack(state: &SearchState, target: u32, round: usize) -> Vec<PathStep> {
    let mut steps: Vec<PathStep> = Vec::new();
    let mut cur = target;
    let mut k = round;

    while k >= 1 {
        if state.arrival(k, cur) == state.arrival(k - 1, cur) {
            k -= 1;
            continue;
        }
        let Some(label) = state.label(k, cur) else {
            break;
        };
        match label {
            Label::Walk { from_stop, depart } => {
                steps.push(PathStep {
                    kind: StepKind::Walk,
                    from: from_stop,
                    to: cur,
                    depart,
                    arrive: state.arrival(k, cur),
                });
                cur = from_stop;
            }
            Label::Ride {
                from_stop,
                route_idx,
                trip_idx,
                board_time,
                board_pos,
                alight_pos,
            } => {
                steps.push(PathStep {
                    kind: StepKind::Ride {
                        route_idx,
                        trip_idx,
                        board_pos,
                        alight_pos,
                    },
                    from: from_stop,
                    to: cur,
                    depart: board_time,
                    arrive: state.arrival(k, cur),
                });
                cur = from_stop;
                k -= 1;
            }
        }
    }

    // A journey may start with a foot transfer relaxed at initialization.
    if let Some(Label::Walk { from_stop, depart }) = state.label(0, cur) {
        steps.push(PathStep {
            kind: StepKind::Walk,
            from: from_stop,
            to: cur,
            depart,
            arrive: state.arrival(0, cur),
        });
    }

    steps.reverse();
    steps
}
