//! Formatter integration tests

use fiscal_identifiers::{
    format, format_cep, format_cnpj, format_cpf, format_phone, format_state_registration_mg,
    normalize, IdentifierKind,
};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(IdentifierKind::Cpf, "52998224725", "529.982.247-25")]
#[case(IdentifierKind::Cnpj, "11222333000181", "11.222.333/0001-81")]
#[case(IdentifierKind::Cep, "01310100", "01310-100")]
#[case(IdentifierKind::Phone, "11912345678", "(11) 91234-5678")]
#[case(IdentifierKind::Phone, "3132221000", "(31) 3222-1000")]
#[case(IdentifierKind::StateRegistrationMg, "0623079040084", "062.307.904.0084")]
fn test_format_full_length(#[case] kind: IdentifierKind, #[case] raw: &str, #[case] expected: &str) {
    assert_eq!(format(kind, raw), expected);
}

#[rstest]
#[case("529.982.")]
#[case("529982247")]
#[case("529982247251")]
#[case("")]
#[case("abc")]
fn test_fixed_masks_pass_through_partial_input(#[case] raw: &str) {
    assert_eq!(format_cpf(raw), raw);
    assert_eq!(format_cnpj(raw), raw);
    assert_eq!(format_cep(raw), raw);
    assert_eq!(format_phone(raw), raw);
}

#[test]
fn test_format_cpf_from_punctuated_input() {
    assert_eq!(format_cpf("529 982 247 25"), "529.982.247-25");
}

fn reformat_is_stable(f: fn(&str) -> String, digits: &str) -> Result<(), TestCaseError> {
    let once = f(digits);
    prop_assert_eq!(normalize(&once), digits);
    prop_assert_eq!(f(&once), once.clone());
    Ok(())
}

proptest! {
    #[test]
    fn prop_cpf_format_idempotent(digits in "[0-9]{11}") {
        reformat_is_stable(format_cpf, &digits)?;
    }

    #[test]
    fn prop_cnpj_format_idempotent(digits in "[0-9]{14}") {
        reformat_is_stable(format_cnpj, &digits)?;
    }

    #[test]
    fn prop_cep_and_phone_format_idempotent(cep in "[0-9]{8}", phone in "[0-9]{10,11}") {
        reformat_is_stable(format_cep, &cep)?;
        reformat_is_stable(format_phone, &phone)?;
    }

    #[test]
    fn prop_state_registration_mask_never_panics(raw in ".{0,30}") {
        let masked = format_state_registration_mg(&raw);
        let digits = normalize(&raw);
        let kept = &digits[..digits.len().min(13)];
        prop_assert_eq!(normalize(&masked), kept);
        prop_assert!(!masked.ends_with('.'));
    }
}
