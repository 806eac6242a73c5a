use jrmi_jmx::{
    build_creation_call, build_identity_call, build_invocation_call, Addressing, CallConfig,
    InvokeArgs,
};
use pretty_assertions::assert_eq;

use super::hex;

const GET_OBJECT_INSTANCE: &str = "50aced0005772200000000000000000000000000000000000000000000ffffffff6073b3361f37bdc27372001b6a617661782e6d616e6167656d656e742e4f626a6563744e616d650f03a71beb6d15cf03000070787074001744656661756c74446f6d61696e3a747970653d4d4c65747870";

const CREATE_MBEAN: &str = "50aced0005772200000000000000000000000000000000000000000000ffffffff22d7fd4a906ac8e674001d6a617661782e6d616e6167656d656e742e6c6f6164696e672e4d4c65747070";

const INVOKE_ONE_ARG: &str = "50aced0005772200000000000000000000000000000000000000000000ffffffff13e7d69417e5da207372001b6a617661782e6d616e6167656d656e742e4f626a6563744e616d650f03a71beb6d15cf03000070787074000e746573743a747970653d546573747874000372756e737200196a6176612e726d692e4d61727368616c6c65644f626a6563747cbd1e97ed63fc3e020003490004686173685b00086c6f6342797465737400025b425b00086f626a427974657371007e0005707870726921c670757200025b42acf317f8060854e002000070787000000030aced0005757200135b4c6a6176612e6c616e672e4f626a6563743b90ce589f1073296c02000078700000000174000131757200135b4c6a6176612e6c616e672e537472696e673badd256e7e91d7b47020000707870000000017400016170";

const INVOKE_NO_ARGS: &str = "50aced0005772200000000000000000000000000000000000000000000ffffffff13e7d69417e5da207372001b6a617661782e6d616e6167656d656e742e4f626a6563744e616d650f03a71beb6d15cf03000070787074000e746573743a747970653d546573747874000372756e737200196a6176612e726d692e4d61727368616c6c65644f626a6563747cbd1e97ed63fc3e020003490004686173685b00086c6f6342797465737400025b425b00086f626a427974657371007e0005707870726921c670757200025b42acf317f8060854e00200007078700000002caced0005757200135b4c6a6176612e6c616e672e4f626a6563743b90ce589f1073296c020000787000000000757200135b4c6a6176612e6c616e672e537472696e673badd256e7e91d7b470200007078700000000070";

#[test]
fn get_object_instance_matches_jdk_stub() {
    let call = build_identity_call(&CallConfig::named("DefaultDomain:type=MLet")).unwrap();
    assert_eq!(hex(&call.encode().unwrap()), GET_OBJECT_INSTANCE);
}

#[test]
fn create_mbean_matches_jdk_stub() {
    let call = build_creation_call(&CallConfig::named("javax.management.loading.MLet")).unwrap();
    assert_eq!(hex(&call.encode().unwrap()), CREATE_MBEAN);
}

#[test]
fn invoke_matches_jdk_stub() {
    let args = InvokeArgs::new().with("a", "1");
    let call =
        build_invocation_call("test:type=Test", "run", &args, &Addressing::default()).unwrap();
    assert_eq!(hex(&call.encode().unwrap()), INVOKE_ONE_ARG);
}

#[test]
fn invoke_without_arguments_writes_empty_arrays() {
    let call = build_invocation_call(
        "test:type=Test",
        "run",
        &InvokeArgs::new(),
        &Addressing::default(),
    )
    .unwrap();
    assert_eq!(hex(&call.encode().unwrap()), INVOKE_NO_ARGS);
}

#[test]
fn addressing_fills_the_call_header() {
    let addressing = Addressing {
        object_number: 1,
        uid_number: 2,
        uid_time: 3,
        uid_count: 4,
    };
    let call = build_identity_call(&CallConfig::new(addressing, "DefaultDomain:type=MLet")).unwrap();
    assert_eq!(
        hex(&call.header()),
        "00000000000000010000000200000000000000030004ffffffff6073b3361f37bdc2"
    );
}
