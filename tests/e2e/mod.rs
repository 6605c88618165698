mod fixture_tests;
mod scenarios;
