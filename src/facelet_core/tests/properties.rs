use facelet_core::{
    Cube, Direction, Face, FaceletState, MoveDescriptor, Slab, Turn,
    analysis::{derive_scheme, find_defects, has_valid_color_quantities, is_solved},
    moves::{apply, apply_turn},
};
use itertools::Itertools;

const SCHEME: [char; 6] = ['W', 'Y', 'R', 'O', 'B', 'G'];
const PALETTE: [char; 8] = ['W', 'Y', 'R', 'O', 'B', 'G', 'P', 'K'];

fn random_state(rng: &mut fastrand::Rng) -> FaceletState<char> {
    let mut state = FaceletState::solved(&SCHEME);
    for face in Face::ALL {
        for row in 0..3 {
            for col in 0..3 {
                if rng.u8(0..3) == 0 {
                    state.paint(face, row, col, PALETTE[rng.usize(0..PALETTE.len())]);
                }
            }
        }
    }
    state
}

fn random_states() -> Vec<FaceletState<char>> {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    (0..64).map(|_| random_state(&mut rng)).collect()
}

#[test_log::test]
fn quarter_turn_four_times_is_identity() {
    for state in random_states() {
        for face in Face::ALL {
            for dir in [Direction::Clockwise, Direction::CounterClockwise] {
                let mut turned = state.clone();
                for _ in 0..4 {
                    apply_turn(&mut turned, Turn::Face(face, dir));
                }
                assert_eq!(turned, state, "{face} {dir:?}");
            }
        }
    }
}

#[test_log::test]
fn turn_then_inverse_is_identity() {
    for state in random_states() {
        for face in Face::ALL {
            for dir in [Direction::Clockwise, Direction::CounterClockwise] {
                let mut turned = state.clone();
                apply_turn(&mut turned, Turn::Face(face, dir));
                apply_turn(&mut turned, Turn::Face(face, dir.inverse()));
                assert_eq!(turned, state, "{face} {dir:?}");
            }
        }
    }
}

#[test_log::test]
fn solved_means_uniform_faces() {
    for state in random_states() {
        let uniform = state
            .faces()
            .iter()
            .all(|grid| grid.iter().flatten().all(|c| c == &grid[0][0]));
        assert_eq!(is_solved(&state), uniform);
    }

    // Uniform faces in a scheme with repeated colors still count as solved
    let odd = FaceletState::solved(&['P', 'P', 'R', 'O', 'B', 'G']);
    assert!(is_solved(&odd));
    assert!(!has_valid_color_quantities(&odd));
}

#[test_log::test]
fn created_cubes_have_no_defects() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..32 {
        let mut colors = PALETTE;
        rng.shuffle(&mut colors);
        let scheme: [char; 6] = std::array::from_fn(|i| colors[i]);

        let state = FaceletState::solved(&scheme);
        assert!(find_defects(&state).is_empty(), "{scheme:?}");
        assert!(has_valid_color_quantities(&state), "{scheme:?}");
    }
}

#[test_log::test]
fn clean_slate_keeps_the_scheme() {
    for state in random_states() {
        let scheme = derive_scheme(&state);
        let mut cube = Cube::new(state);
        cube.clean_slate();

        assert!(cube.is_solved());
        assert_eq!(cube.scheme(), scheme);
    }
}

#[test_log::test]
fn restore_is_idempotent() {
    let mut rng = fastrand::Rng::with_seed(11);
    for state in random_states() {
        let mut cube = Cube::new(state);
        for _ in 0..10 {
            let token = ["R", "Ui", "F2", "H", "Vi", "RS", "CD"][rng.usize(0..7)];
            cube.execute(token).unwrap();
        }

        cube.restore();
        let once = cube.state().clone();
        cube.restore();
        assert_eq!(cube.state(), &once);
        assert_eq!(cube.state(), cube.baseline());
    }
}

#[test_log::test]
fn right_then_inverse_on_a_solved_cube() {
    let mut cube = Cube::solved(&SCHEME);
    cube.execute("R").unwrap();
    assert!(!cube.is_solved());
    cube.execute("Ri").unwrap();
    assert_eq!(cube.state(), &FaceletState::solved(&SCHEME));
}

#[test_log::test]
fn double_turn_twice_equals_four_quarter_turns() {
    let mut doubled = Cube::solved(&SCHEME);
    doubled.execute("R2").unwrap();
    assert!(!doubled.is_solved());
    doubled.execute("R2").unwrap();

    let mut quartered = Cube::solved(&SCHEME);
    quartered.execute("R R R R").unwrap();

    assert_eq!(doubled.state(), quartered.state());
    assert_eq!(doubled.state(), &FaceletState::solved(&SCHEME));
}

#[test_log::test]
fn repainted_up_facelet_is_excessive() {
    let mut cube = Cube::solved(&SCHEME);
    let right = cube.scheme()[Face::Right];
    cube.paint(Face::Up, 0, 1, right);

    assert_eq!(cube.state().iter().filter(|&&c| c == right).count(), 10);

    let report = cube.defects();
    assert_eq!(report.excessive, vec![right]);
    assert!(report.redundant.is_empty());
    assert!(!report.too_many_colors);
    assert!(!cube.has_valid_color_quantities());
}

#[test_log::test]
fn slab_matches_its_primitives() {
    let mut cube = Cube::solved(&SCHEME);
    cube.execute("RS").unwrap();

    let mut manual = FaceletState::solved(&SCHEME);
    for turn in Slab::Right.sequence() {
        apply_turn(&mut manual, turn);
    }

    assert_eq!(
        Slab::Right.sequence().iter().join(" "),
        "Ui H D"
    );
    assert_eq!(cube.state(), &manual);

    let mut scrambled = Cube::solved(&SCHEME);
    scrambled.execute("scramble").unwrap();
    let mut by_primitives = scrambled.state().clone();
    scrambled.execute("RS").unwrap();
    apply(&mut by_primitives, &"Ui".parse::<MoveDescriptor>().unwrap());
    apply(&mut by_primitives, &"H".parse::<MoveDescriptor>().unwrap());
    apply(&mut by_primitives, &"D".parse::<MoveDescriptor>().unwrap());
    assert_eq!(scrambled.state(), &by_primitives);
}

#[test_log::test]
fn rejected_batch_keeps_earlier_moves() {
    let mut cube = Cube::solved(&SCHEME);
    let rx = cube.subscribe();

    let err = cube.execute("R, U, Z2, F").unwrap_err();
    assert_eq!(err.applied, 2);
    assert_eq!(
        err.to_string(),
        "Invalid move notation: `Z2` (after 2 applied move(s))"
    );

    let heard = rx.try_iter().map(|event| event.descriptor.to_string()).collect_vec();
    assert_eq!(heard, vec!["R", "U"]);

    let mut expected = FaceletState::solved(&SCHEME);
    apply_turn(&mut expected, Turn::Face(Face::Right, Direction::Clockwise));
    apply_turn(&mut expected, Turn::Face(Face::Up, Direction::Clockwise));
    assert_eq!(cube.state(), &expected);
}

#[test_log::test]
fn scramble_then_inverse_solves() {
    let mut cube = Cube::solved(&SCHEME);
    cube.execute("scramble").unwrap();
    assert!(!cube.is_solved());
    assert!(cube.has_valid_color_quantities());

    let undo = facelet_core::notation::SCRAMBLE
        .iter()
        .rev()
        .map(|token| token.parse::<MoveDescriptor>().unwrap().inverse().to_string())
        .join(" ");
    cube.execute(&undo).unwrap();
    assert!(cube.is_solved());
}
