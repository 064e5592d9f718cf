mod composite_file_loader_test;
