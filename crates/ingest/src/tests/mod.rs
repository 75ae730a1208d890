mod boundary_tests;
