mod compliance_service_test;
mod multi_format_exporter_test;
