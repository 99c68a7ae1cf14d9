#![cfg(feature = "serde")]

extern crate easy_adjoint;

mod serialization_tests {
    use easy_adjoint::differentiation::{BinaryOperation, Operation, Tape, Trace, UnaryFunction};
    use easy_adjoint::numeric::Elementary;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        kinds: Vec<BinaryOperation>,
        functions: Vec<UnaryFunction>,
        point: Trace<f64>,
    }

    #[test]
    fn trace_round_trips_through_toml() {
        let trace = Trace::new(2.5, -0.5);
        let encoded = toml::to_string(&trace).unwrap();
        assert_eq!(encoded, "number = 2.5\nderivative = -0.5\n");
        let decoded: Trace<f64> = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, trace);
    }

    #[test]
    fn recorded_kinds_round_trip_through_toml() {
        let tape = Tape::new();
        let x = tape.variable(0.5_f64);
        let y = (x * 2.0).sin() + x;
        let mut kinds = Vec::new();
        let mut functions = Vec::new();
        for operation in tape.operations() {
            match operation {
                Operation::Binary { kind, .. } => kinds.push(kind),
                Operation::Unary { kind, .. } => functions.push(kind),
            }
        }
        assert_eq!(kinds, vec![BinaryOperation::Mul, BinaryOperation::Add]);
        assert_eq!(functions, vec![UnaryFunction::Sin]);
        let snapshot = Snapshot {
            kinds,
            functions,
            point: Trace::new(y.value(), y.derivative(&[x]).unwrap()[0]),
        };
        let encoded = toml::to_string(&snapshot).unwrap();
        let decoded: Snapshot = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
