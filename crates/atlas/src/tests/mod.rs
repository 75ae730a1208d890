mod helpers;
mod atlas_tests;
mod probe_tests;
