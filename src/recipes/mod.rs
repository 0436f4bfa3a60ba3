// Copyright (C) Brian G. Milnes 2025

//! The built-in recipe catalog

pub mod support;

pub mod boolean_checks_not_inverted;
pub mod equals_avoids_null;
pub mod explicit_initialization;
pub mod is_empty_call_on_collections;
pub mod javadoc_non_ascii_characters;
pub mod lambda_block_to_expression;
pub mod modifier_order;
pub mod need_braces;
pub mod no_null_check_before_instanceof;
pub mod no_to_string_on_string_type;
pub mod remove_annotation;
pub mod remove_unused_local_variables;
pub mod remove_unused_private_fields;
pub mod remove_unused_private_methods;
pub mod simplify_boolean_expression;
pub mod static_method_not_final;
pub mod string_literal_equality;
pub mod try_with_resources;
pub mod unnecessary_close_in_try_with_resources;
pub mod unnecessary_parentheses;
pub mod upper_case_long_literals;
pub mod use_diamond_operator;
pub mod while_instead_of_for;

use crate::recipe::recipe::{RecipeDescriptor, RecipeFactory};

static BUILTIN: &[(&RecipeDescriptor, RecipeFactory)] = &[
    (&boolean_checks_not_inverted::DESCRIPTOR, boolean_checks_not_inverted::BooleanChecksNotInverted::create),
    (&simplify_boolean_expression::DESCRIPTOR, simplify_boolean_expression::SimplifyBooleanExpression::create),
    (&try_with_resources::DESCRIPTOR, try_with_resources::TryWithResources::create),
    (&remove_unused_private_fields::DESCRIPTOR, remove_unused_private_fields::RemoveUnusedPrivateFields::create),
    (&remove_unused_private_methods::DESCRIPTOR, remove_unused_private_methods::RemoveUnusedPrivateMethods::create),
    (&remove_unused_local_variables::DESCRIPTOR, remove_unused_local_variables::RemoveUnusedLocalVariables::create),
    (&equals_avoids_null::DESCRIPTOR, equals_avoids_null::EqualsAvoidsNull::create),
    (&string_literal_equality::DESCRIPTOR, string_literal_equality::StringLiteralEquality::create),
    (&is_empty_call_on_collections::DESCRIPTOR, is_empty_call_on_collections::IsEmptyCallOnCollections::create),
    (&no_to_string_on_string_type::DESCRIPTOR, no_to_string_on_string_type::NoToStringOnStringType::create),
    (&explicit_initialization::DESCRIPTOR, explicit_initialization::ExplicitInitialization::create),
    (&static_method_not_final::DESCRIPTOR, static_method_not_final::StaticMethodNotFinal::create),
    (&modifier_order::DESCRIPTOR, modifier_order::ModifierOrder::create),
    (&upper_case_long_literals::DESCRIPTOR, upper_case_long_literals::UpperCaseLongLiterals::create),
    (&lambda_block_to_expression::DESCRIPTOR, lambda_block_to_expression::LambdaBlockToExpression::create),
    (&while_instead_of_for::DESCRIPTOR, while_instead_of_for::WhileInsteadOfFor::create),
    (&unnecessary_close_in_try_with_resources::DESCRIPTOR, unnecessary_close_in_try_with_resources::UnnecessaryCloseInTryWithResources::create),
    (&no_null_check_before_instanceof::DESCRIPTOR, no_null_check_before_instanceof::NoNullCheckBeforeInstanceof::create),
    (&use_diamond_operator::DESCRIPTOR, use_diamond_operator::UseDiamondOperator::create),
    (&unnecessary_parentheses::DESCRIPTOR, unnecessary_parentheses::UnnecessaryParentheses::create),
    (&need_braces::DESCRIPTOR, need_braces::NeedBraces::create),
    (&javadoc_non_ascii_characters::DESCRIPTOR, javadoc_non_ascii_characters::JavadocNonAsciiCharacters::create),
    (&remove_annotation::DESCRIPTOR, remove_annotation::RemoveAnnotation::create),
];

/// Every built-in recipe with its constructor
pub fn all() -> Vec<(&'static RecipeDescriptor, RecipeFactory)> {
    BUILTIN.to_vec()
}
