mod raster_tests;
