mod executor_tests;
mod policy_tests;
