use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sedml::prelude::*;

/// A Level 1 Version 4 document with `n` models, each with its own
/// time course, task and data generator, and one report over all of them.
fn generate_document(n: usize) -> SedDocument {
    let mut doc = SedDocument::new(1, 4).expect("Invalid namespaces");

    for i in 0..n {
        let model = doc.create_model().expect("Failed to create model");
        model.set_id(&format!("model{i}")).expect("Invalid id");
        model
            .set_language("urn:sedml:language:sbml")
            .expect("Failed to set language");
        model
            .set_source(&format!("model{i}.xml"))
            .expect("Failed to set source");
        let change = model
            .create_change_attribute()
            .expect("Failed to create change");
        change
            .set_target("/sbml:sbml/sbml:model/sbml:listOfParameters/sbml:parameter[@id='k1']/@value")
            .expect("Failed to set target");
        change
            .set_new_value(&format!("{}", i as f64 * 0.1))
            .expect("Failed to set value");

        let simulation = doc
            .create_uniform_time_course()
            .expect("Failed to create simulation");
        simulation.set_id(&format!("sim{i}")).expect("Invalid id");
        simulation.set_initial_time(0.0).expect("Invalid time");
        simulation.set_output_start_time(0.0).expect("Invalid time");
        simulation.set_output_end_time(100.0).expect("Invalid time");
        simulation.set_number_of_steps(1000).expect("Invalid steps");
        simulation
            .create_algorithm()
            .set_kisao_id("KISAO:0000019")
            .expect("Invalid KiSAO id");

        let task = doc.create_task().expect("Failed to create task");
        task.set_id(&format!("task{i}")).expect("Invalid id");
        task.set_model_reference(&format!("model{i}"))
            .expect("Invalid reference");
        task.set_simulation_reference(&format!("sim{i}"))
            .expect("Invalid reference");

        let generator = doc
            .create_data_generator()
            .expect("Failed to create data generator");
        generator.set_id(&format!("dg{i}")).expect("Invalid id");
        let variable = generator
            .create_variable()
            .expect("Failed to create variable");
        variable.set_id(&format!("var{i}")).expect("Invalid id");
        variable
            .set_symbol("urn:sedml:symbol:time")
            .expect("Failed to set symbol");
        variable
            .set_task_reference(&format!("task{i}"))
            .expect("Invalid reference");
        generator
            .set_math_string(&format!(
                "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><ci>var{i}</ci></math>"
            ))
            .expect("Invalid math");
    }

    let report = doc.create_report().expect("Failed to create report");
    report.set_id("report").expect("Invalid id");
    for i in 0..n {
        let data_set = report.create_data_set().expect("Failed to create data set");
        data_set.set_id(&format!("ds{i}")).expect("Invalid id");
        data_set.set_label(&format!("dg{i}")).expect("Failed to set label");
        data_set
            .set_data_reference(&format!("dg{i}"))
            .expect("Invalid reference");
    }

    doc
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let doc = generate_document(200);
    let xml = write_sedml_to_string(&doc).expect("Failed to write document");

    c.bench_function("write_document", |b| {
        b.iter(|| {
            let _ = black_box(write_sedml_to_string(black_box(&doc)));
        });
    });

    c.bench_function("read_document", |b| {
        b.iter(|| {
            let _ = black_box(read_sedml_from_string(black_box(&xml)));
        });
    });

    c.bench_function("check_consistency", |b| {
        b.iter(|| {
            let _ = black_box(check_consistency(black_box(&doc)));
        });
    });
}

criterion_group!(benches, benchmark_roundtrip);
criterion_main!(benches);
